use rocket::{response::status::Created, serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::{
    api::QuestionDto, criteria::QuestionCriteria, db::Question, pagination::Pageable, EntityId,
};
use crate::service::EntityService;
use crate::Config;

use super::{
    headers::WithHeaders,
    resource::{self, JsonWithHeaders},
};

const BASE_URL: &str = "/api/questions";
const SEARCH_URL: &str = "/api/_search/questions";

pub fn routes() -> Vec<Route> {
    routes![
        create_question,
        update_question,
        get_all_questions,
        count_questions,
        get_question,
        delete_question,
        search_questions,
    ]
}

#[post("/questions", data = "<question>", format = "json")]
async fn create_question(
    question: Json<QuestionDto>,
    questions: EntityService<Question>,
    config: &State<Config>,
) -> Result<WithHeaders<Created<Json<QuestionDto>>>> {
    resource::create(question.into_inner(), &questions, config, BASE_URL).await
}

#[put("/questions", data = "<question>", format = "json")]
async fn update_question(
    question: Json<QuestionDto>,
    questions: EntityService<Question>,
    config: &State<Config>,
) -> Result<JsonWithHeaders<QuestionDto>> {
    resource::update(question.into_inner(), &questions, config).await
}

#[get("/questions?<criteria..>")]
async fn get_all_questions(
    criteria: QuestionCriteria,
    pageable: Pageable,
    questions: EntityService<Question>,
) -> Result<JsonWithHeaders<Vec<QuestionDto>>> {
    resource::list(&criteria, &pageable, &questions, BASE_URL).await
}

#[get("/questions/count?<criteria..>")]
async fn count_questions(
    criteria: QuestionCriteria,
    questions: EntityService<Question>,
) -> Result<Json<u64>> {
    resource::count(&criteria, &questions).await
}

#[get("/questions/<id>")]
async fn get_question(
    id: EntityId,
    questions: EntityService<Question>,
) -> Result<Json<QuestionDto>> {
    resource::get(id, &questions).await
}

#[delete("/questions/<id>")]
async fn delete_question(
    id: EntityId,
    questions: EntityService<Question>,
    config: &State<Config>,
) -> Result<WithHeaders<()>> {
    resource::delete(id, &questions, config).await
}

#[get("/_search/questions?<query>")]
async fn search_questions(
    query: String,
    pageable: Pageable,
    questions: EntityService<Question>,
) -> Result<JsonWithHeaders<Vec<QuestionDto>>> {
    resource::search(&query, &pageable, &questions, SEARCH_URL).await
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::{json, Value},
    };

    use super::*;
    use crate::model::{api::SectionDto, mongodb::Coll};

    async fn post<T: serde::de::DeserializeOwned + Send + 'static>(client: &Client, uri: &str, body: Value) -> T {
        let response = client
            .post(uri.to_string())
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        response.into_json().await.unwrap()
    }

    async fn new_section(client: &Client, text: &str) -> EntityId {
        let section: SectionDto = post(client, "/api/sections", json!({ "text": text })).await;
        section.id.unwrap()
    }

    async fn new_question(client: &Client, text: &str, section_id: Option<EntityId>) -> QuestionDto {
        post(
            client,
            "/api/questions",
            json!({ "text": text, "sectionId": section_id }),
        )
        .await
    }

    async fn fetch_question(client: &Client, id: EntityId) -> QuestionDto {
        let response = client.get(format!("/api/questions/{id}")).dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        response.into_json().await.unwrap()
    }

    #[backend_test]
    async fn section_text_is_resolved(client: Client, questions: Coll<Question>) {
        let section_id = new_section(&client, "Demographics").await;
        let created = new_question(&client, "Age?", Some(section_id)).await;
        assert_eq!(created.section_id, Some(section_id));
        assert_eq!(created.section_text.as_deref(), Some("Demographics"));

        let fetched = fetch_question(&client, created.id.unwrap()).await;
        assert_eq!(fetched, created);

        // Only the section reference is stored.
        let raw = questions
            .clone_with_type::<mongodb::bson::Document>()
            .find_one(doc! { "_id": created.id.unwrap() }, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw.get_document("section").unwrap(), &doc! { "_id": section_id });
    }

    #[backend_test]
    async fn section_text_in_request_is_ignored(client: Client) {
        let section_id = new_section(&client, "Demographics").await;
        let created: QuestionDto = post(
            &client,
            "/api/questions",
            json!({ "text": "Age?", "sectionId": section_id, "sectionText": "Bogus" }),
        )
        .await;
        assert_eq!(created.section_text.as_deref(), Some("Demographics"));
    }

    #[backend_test]
    async fn question_without_section(client: Client) {
        let created = new_question(&client, "Free text", None).await;
        assert_eq!(created.section_id, None);
        assert_eq!(created.section_text, None);
    }

    #[backend_test]
    async fn filter_by_section(client: Client) {
        let first = new_section(&client, "First").await;
        let second = new_section(&client, "Second").await;
        new_question(&client, "Q1", Some(first)).await;
        new_question(&client, "Q2", Some(second)).await;
        new_question(&client, "Q3", Some(first)).await;

        let response = client
            .get(format!("/api/questions?sectionId.equals={first}"))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.headers().get_one("X-Total-Count"), Some("2"));
        let found: Vec<QuestionDto> = response.into_json().await.unwrap();
        let texts = found
            .iter()
            .map(|question| question.text.as_deref().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["Q1", "Q3"]);
        assert!(found
            .iter()
            .all(|question| question.section_text.as_deref() == Some("First")));

        let count: u64 = client
            .get(format!("/api/questions/count?sectionId.in={first}&sectionId.in={second}"))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(count, 3);

        // Questions without a section differ from no section.
        new_question(&client, "Q4", None).await;
        let count: u64 = client
            .get(format!("/api/questions/count?sectionId.notEquals={first}"))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[backend_test]
    async fn renamed_section_is_visible(client: Client) {
        let section_id = new_section(&client, "Old name").await;
        let question_id = new_question(&client, "Q", Some(section_id)).await.id.unwrap();

        let response = client
            .put("/api/sections")
            .header(ContentType::JSON)
            .body(json!({ "id": section_id, "text": "New name" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let fetched = fetch_question(&client, question_id).await;
        assert_eq!(fetched.section_text.as_deref(), Some("New name"));
    }

    #[backend_test]
    async fn deleted_section_leaves_reference(client: Client) {
        let section_id = new_section(&client, "Gone soon").await;
        let question_id = new_question(&client, "Q", Some(section_id)).await.id.unwrap();

        let response = client
            .delete(format!("/api/sections/{section_id}"))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let fetched = fetch_question(&client, question_id).await;
        assert_eq!(fetched.section_id, Some(section_id));
        assert_eq!(fetched.section_text, None);

        // Search agrees with the primary collection.
        let found: Vec<QuestionDto> = client
            .get("/api/_search/questions?query=Q")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(found, vec![fetched]);
    }

    #[backend_test]
    async fn unknown_section_rejected(client: Client, questions: Coll<Question>) {
        let response = client
            .post("/api/questions")
            .header(ContentType::JSON)
            .body(json!({ "text": "Q", "sectionId": 999 }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.headers().get_one("X-shApp-error"),
            Some("error.idnotfound")
        );
        let problem: Value = response.into_json().await.unwrap();
        assert_eq!(problem["entityName"], "question");
        assert_eq!(questions.count_documents(None, None).await.unwrap(), 0);

        // An update pointing at a missing section leaves the stored question alone.
        let section_id = new_section(&client, "Real").await;
        let question_id = new_question(&client, "Q", Some(section_id)).await.id.unwrap();
        let response = client
            .put("/api/questions")
            .header(ContentType::JSON)
            .body(json!({ "id": question_id, "text": "Changed", "sectionId": 999 }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let fetched = fetch_question(&client, question_id).await;
        assert_eq!(fetched.text.as_deref(), Some("Q"));
        assert_eq!(fetched.section_id, Some(section_id));
    }

    #[backend_test]
    async fn search_resolves_sections(client: Client) {
        let section_id = new_section(&client, "Work").await;
        new_question(&client, "Hours worked per week?", Some(section_id)).await;
        new_question(&client, "Favourite colour?", None).await;

        let found: Vec<QuestionDto> = client
            .get("/api/_search/questions?query=WORKED")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].section_text.as_deref(), Some("Work"));
    }

    #[backend_test]
    async fn sort_by_section(client: Client) {
        let first = new_section(&client, "First").await;
        let second = new_section(&client, "Second").await;
        new_question(&client, "A", Some(second)).await;
        new_question(&client, "B", Some(first)).await;

        let found: Vec<QuestionDto> = client
            .get("/api/questions?sort=sectionId,asc")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        let texts = found
            .iter()
            .map(|question| question.text.as_deref().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["B", "A"]);
    }
}

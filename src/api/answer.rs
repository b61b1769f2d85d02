use rocket::{response::status::Created, serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::{
    api::AnswerDto, criteria::AnswerCriteria, db::Answer, pagination::Pageable, EntityId,
};
use crate::service::EntityService;
use crate::Config;

use super::{
    headers::WithHeaders,
    resource::{self, JsonWithHeaders},
};

const BASE_URL: &str = "/api/answers";
const SEARCH_URL: &str = "/api/_search/answers";

pub fn routes() -> Vec<Route> {
    routes![
        create_answer,
        update_answer,
        get_all_answers,
        count_answers,
        get_answer,
        delete_answer,
        search_answers,
    ]
}

#[post("/answers", data = "<answer>", format = "json")]
async fn create_answer(
    answer: Json<AnswerDto>,
    answers: EntityService<Answer>,
    config: &State<Config>,
) -> Result<WithHeaders<Created<Json<AnswerDto>>>> {
    resource::create(answer.into_inner(), &answers, config, BASE_URL).await
}

#[put("/answers", data = "<answer>", format = "json")]
async fn update_answer(
    answer: Json<AnswerDto>,
    answers: EntityService<Answer>,
    config: &State<Config>,
) -> Result<JsonWithHeaders<AnswerDto>> {
    resource::update(answer.into_inner(), &answers, config).await
}

#[get("/answers?<criteria..>")]
async fn get_all_answers(
    criteria: AnswerCriteria,
    pageable: Pageable,
    answers: EntityService<Answer>,
) -> Result<JsonWithHeaders<Vec<AnswerDto>>> {
    resource::list(&criteria, &pageable, &answers, BASE_URL).await
}

#[get("/answers/count?<criteria..>")]
async fn count_answers(
    criteria: AnswerCriteria,
    answers: EntityService<Answer>,
) -> Result<Json<u64>> {
    resource::count(&criteria, &answers).await
}

#[get("/answers/<id>")]
async fn get_answer(id: EntityId, answers: EntityService<Answer>) -> Result<Json<AnswerDto>> {
    resource::get(id, &answers).await
}

#[delete("/answers/<id>")]
async fn delete_answer(
    id: EntityId,
    answers: EntityService<Answer>,
    config: &State<Config>,
) -> Result<WithHeaders<()>> {
    resource::delete(id, &answers, config).await
}

#[get("/_search/answers?<query>")]
async fn search_answers(
    query: String,
    pageable: Pageable,
    answers: EntityService<Answer>,
) -> Result<JsonWithHeaders<Vec<AnswerDto>>> {
    resource::search(&query, &pageable, &answers, SEARCH_URL).await
}

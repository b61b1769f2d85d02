use rocket::{response::status::Created, serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::{
    api::SectionDto, criteria::SectionCriteria, db::Section, pagination::Pageable, EntityId,
};
use crate::service::EntityService;
use crate::Config;

use super::{
    headers::WithHeaders,
    resource::{self, JsonWithHeaders},
};

const BASE_URL: &str = "/api/sections";
const SEARCH_URL: &str = "/api/_search/sections";

pub fn routes() -> Vec<Route> {
    routes![
        create_section,
        update_section,
        get_all_sections,
        count_sections,
        get_section,
        delete_section,
        search_sections,
    ]
}

#[post("/sections", data = "<section>", format = "json")]
async fn create_section(
    section: Json<SectionDto>,
    sections: EntityService<Section>,
    config: &State<Config>,
) -> Result<WithHeaders<Created<Json<SectionDto>>>> {
    resource::create(section.into_inner(), &sections, config, BASE_URL).await
}

#[put("/sections", data = "<section>", format = "json")]
async fn update_section(
    section: Json<SectionDto>,
    sections: EntityService<Section>,
    config: &State<Config>,
) -> Result<JsonWithHeaders<SectionDto>> {
    resource::update(section.into_inner(), &sections, config).await
}

#[get("/sections?<criteria..>")]
async fn get_all_sections(
    criteria: SectionCriteria,
    pageable: Pageable,
    sections: EntityService<Section>,
) -> Result<JsonWithHeaders<Vec<SectionDto>>> {
    resource::list(&criteria, &pageable, &sections, BASE_URL).await
}

#[get("/sections/count?<criteria..>")]
async fn count_sections(
    criteria: SectionCriteria,
    sections: EntityService<Section>,
) -> Result<Json<u64>> {
    resource::count(&criteria, &sections).await
}

#[get("/sections/<id>")]
async fn get_section(id: EntityId, sections: EntityService<Section>) -> Result<Json<SectionDto>> {
    resource::get(id, &sections).await
}

#[delete("/sections/<id>")]
async fn delete_section(
    id: EntityId,
    sections: EntityService<Section>,
    config: &State<Config>,
) -> Result<WithHeaders<()>> {
    resource::delete(id, &sections, config).await
}

#[get("/_search/sections?<query>")]
async fn search_sections(
    query: String,
    pageable: Pageable,
    sections: EntityService<Section>,
) -> Result<JsonWithHeaders<Vec<SectionDto>>> {
    resource::search(&query, &pageable, &sections, SEARCH_URL).await
}

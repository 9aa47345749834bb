//! Creature catalog API handlers.
//!
//! ```text
//! GET    /api/v1/creatures?page=1&pageSize=10&sortBy=NAME&type=electric
//! GET    /api/v1/creatures/{id}        id is a UUID or a pokedex number
//! POST   /api/v1/creatures             bearer token required
//! PATCH  /api/v1/creatures/{id}        bearer token required
//! DELETE /api/v1/creatures/{id}        bearer token required
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageInfo};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Creature, CreatureDraft, CreatureFilter, CreaturePatch, Error, Sort, SortField, SortOrder,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::presented_token;
use crate::inbound::http::schemas::PageInfoSchema;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/creatures`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCreaturesQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; one of 10, 20, 50. Defaults to 10.
    pub page_size: Option<u32>,
    /// Sort key; defaults to NAME.
    pub sort_by: Option<SortField>,
    /// Sort direction; defaults to ASC.
    pub sort_order: Option<SortOrder>,
    /// Case-insensitive name substring filter.
    pub name: Option<String>,
    /// Inclusive lower height bound.
    pub min_height: Option<i32>,
    /// Inclusive upper height bound.
    pub max_height: Option<i32>,
    /// Inclusive lower weight bound.
    pub min_weight: Option<i32>,
    /// Inclusive upper weight bound.
    pub max_weight: Option<i32>,
    /// Case-insensitive substring filter against the type list.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One page of catalog results.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatureListResponse {
    /// The creatures inside the requested window, in sort order.
    pub items: Vec<Creature>,
    /// Count of all filtered creatures, independent of paging.
    pub total_count: u64,
    /// Derived window metadata.
    #[schema(value_type = PageInfoSchema)]
    pub page_info: PageInfo,
}

/// Request body for `POST /api/v1/creatures`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreatureRequest {
    /// Optional alternate human-facing key; must be unused.
    pub pokedex_number: Option<i32>,
    /// Display name, non-empty after trimming.
    pub name: String,
    /// Height as an opaque integer.
    pub height: i32,
    /// Weight as an opaque integer.
    pub weight: i32,
    /// Sprite or artwork URL.
    pub image_url: Option<String>,
    /// Elemental types; at least one entry.
    pub types: Vec<String>,
    /// Type weaknesses; defaults to empty.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Abilities; defaults to empty.
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Species category label.
    pub category: Option<String>,
    /// Flavour text.
    pub description: Option<String>,
}

impl From<CreateCreatureRequest> for CreatureDraft {
    fn from(value: CreateCreatureRequest) -> Self {
        Self {
            pokedex_number: value.pokedex_number,
            name: value.name,
            height: value.height,
            weight: value.weight,
            image_url: value.image_url,
            types: value.types,
            weaknesses: value.weaknesses,
            abilities: value.abilities,
            category: value.category,
            description: value.description,
        }
    }
}

/// Request body for `PATCH /api/v1/creatures/{id}`.
///
/// Absent fields keep their stored values; the pokedex number cannot
/// be changed after creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCreatureRequest {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement height.
    pub height: Option<i32>,
    /// Replacement weight.
    pub weight: Option<i32>,
    /// Replacement image URL.
    pub image_url: Option<String>,
    /// Replacement type list; must stay non-empty.
    pub types: Option<Vec<String>>,
    /// Replacement weakness list.
    pub weaknesses: Option<Vec<String>>,
    /// Replacement ability list.
    pub abilities: Option<Vec<String>>,
    /// Replacement category label.
    pub category: Option<String>,
    /// Replacement flavour text.
    pub description: Option<String>,
}

impl From<UpdateCreatureRequest> for CreaturePatch {
    fn from(value: UpdateCreatureRequest) -> Self {
        Self {
            name: value.name,
            height: value.height,
            weight: value.weight,
            image_url: value.image_url,
            types: value.types,
            weaknesses: value.weaknesses,
            abilities: value.abilities,
            category: value.category,
            description: value.description,
        }
    }
}

/// Paginated, filtered, sorted catalog listing.
#[utoipa::path(
    get,
    path = "/api/v1/creatures",
    params(ListCreaturesQuery),
    responses(
        (status = 200, description = "A page of creatures", body = CreatureListResponse),
        (status = 400, description = "Invalid paging or filter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["creatures"],
    operation_id = "listCreatures",
    security([])
)]
#[get("/creatures")]
pub async fn list_creatures(
    state: web::Data<HttpState>,
    query: web::Query<ListCreaturesQuery>,
) -> ApiResult<web::Json<CreatureListResponse>> {
    let query = query.into_inner();
    let sort = Sort {
        field: query.sort_by.unwrap_or_default(),
        order: query.sort_order.unwrap_or_default(),
    };
    let filter = CreatureFilter {
        name: query.name,
        min_height: query.min_height,
        max_height: query.max_height,
        min_weight: query.min_weight,
        max_weight: query.max_weight,
        kind: query.kind,
    };

    let page = state
        .catalog
        .list(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
            &filter,
        )
        .await?;

    Ok(web::Json(CreatureListResponse {
        items: page.items,
        total_count: page.total_count,
        page_info: page.page_info,
    }))
}

/// Single-creature lookup by UUID or pokedex number.
#[utoipa::path(
    get,
    path = "/api/v1/creatures/{id}",
    params(("id" = String, Path, description = "Native UUID or pokedex number")),
    responses(
        (status = 200, description = "The creature", body = Creature),
        (status = 404, description = "No creature under either key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["creatures"],
    operation_id = "getCreature",
    security([])
)]
#[get("/creatures/{id}")]
pub async fn get_creature(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Creature>> {
    let creature = state.catalog.get(&path.into_inner()).await?;
    Ok(web::Json(creature))
}

/// Create a creature. Requires a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/creatures",
    request_body = CreateCreatureRequest,
    responses(
        (status = 201, description = "Created", body = Creature),
        (status = 400, description = "Validation failure", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 409, description = "Pokedex number already assigned", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["creatures"],
    operation_id = "createCreature"
)]
#[post("/creatures")]
pub async fn create_creature(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<CreateCreatureRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .catalog
        .create(presented_token(&req), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

/// Partially update a creature. Requires a bearer token.
#[utoipa::path(
    patch,
    path = "/api/v1/creatures/{id}",
    params(("id" = String, Path, description = "Native UUID or pokedex number")),
    request_body = UpdateCreatureRequest,
    responses(
        (status = 200, description = "Updated", body = Creature),
        (status = 400, description = "Validation failure", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No creature under either key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["creatures"],
    operation_id = "updateCreature"
)]
#[patch("/creatures/{id}")]
pub async fn update_creature(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    payload: web::Json<UpdateCreatureRequest>,
) -> ApiResult<web::Json<Creature>> {
    let updated = state
        .catalog
        .update(
            presented_token(&req),
            &path.into_inner(),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(updated))
}

/// Delete a creature. Requires a bearer token.
#[utoipa::path(
    delete,
    path = "/api/v1/creatures/{id}",
    params(("id" = String, Path, description = "Native UUID or pokedex number")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No creature under either key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["creatures"],
    operation_id = "deleteCreature"
)]
#[delete("/creatures/{id}")]
pub async fn delete_creature(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .catalog
        .delete(presented_token(&req), &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::CreatureRepository;
    use crate::inbound::http::test_utils::{test_state, valid_token};

    fn sample_draft(pokedex: Option<i32>, name: &str, height: i32, weight: i32) -> CreatureDraft {
        CreatureDraft {
            pokedex_number: pokedex,
            name: name.to_owned(),
            height,
            weight,
            image_url: None,
            types: vec!["Electric".to_owned()],
            weaknesses: vec!["Ground".to_owned()],
            abilities: vec!["Static".to_owned()],
            category: Some("Mouse".to_owned()),
            description: None,
        }
    }

    macro_rules! test_app {
        ($state:expr) => {
            actix_test::init_service(
                App::new().app_data($state.clone()).service(
                    web::scope("/api/v1")
                        .service(list_creatures)
                        .service(get_creature)
                        .service(create_creature)
                        .service(update_creature)
                        .service(delete_creature),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn list_returns_camel_case_page_envelope() {
        let (creatures, _, state) = test_state();
        let _ = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/creatures")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["pageInfo"]["currentPage"], 1);
        assert_eq!(value["pageInfo"]["totalPages"], 1);
        assert_eq!(value["pageInfo"]["pageSize"], 10);
        let first = &value["items"][0];
        assert_eq!(first["name"], "Pikachu");
        assert_eq!(first["pokedexNumber"], 25);
        assert!(first.get("pokedex_number").is_none());
        assert!(first.get("createdAt").is_some());
    }

    #[rstest]
    #[case("pageSize=15")]
    #[case("page=0")]
    #[actix_web::test]
    async fn list_rejects_invalid_paging(#[case] query: &str) {
        let (_, _, state) = test_state();
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/creatures?{query}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn list_applies_type_filter_and_sort_from_the_query_string() {
        let (creatures, _, state) = test_state();
        let _ = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let _ = creatures.insert_creature(CreatureDraft {
            types: vec!["Water".to_owned()],
            ..sample_draft(Some(7), "Squirtle", 50, 90)
        });
        let _ = creatures.insert_creature(CreatureDraft {
            types: vec!["Electric".to_owned(), "Steel".to_owned()],
            ..sample_draft(Some(81), "Magnemite", 30, 60)
        });
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/creatures?type=electric&sortBy=HEIGHT&sortOrder=DESC")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["totalCount"], 2);
        assert_eq!(value["items"][0]["name"], "Pikachu");
        assert_eq!(value["items"][1]["name"], "Magnemite");
    }

    #[actix_web::test]
    async fn get_resolves_uuid_and_pokedex_number_to_the_same_creature() {
        let (creatures, _, state) = test_state();
        let pikachu = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let app = test_app!(state);

        for id in [pikachu.id().to_string(), "25".to_owned()] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::get()
                    .uri(&format!("/api/v1/creatures/{id}"))
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            let value: Value = actix_test::read_body_json(response).await;
            assert_eq!(value["id"], pikachu.id().to_string());
        }
    }

    #[actix_web::test]
    async fn get_unknown_identifier_is_not_found() {
        let (_, _, state) = test_state();
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/creatures/999999")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "not_found");
        assert_eq!(value["message"], "creature not found");
    }

    fn create_body() -> Value {
        json!({
            "pokedexNumber": 133,
            "name": "Eevee",
            "height": 30,
            "weight": 65,
            "types": ["Normal"],
        })
    }

    #[actix_web::test]
    async fn create_without_a_token_is_unauthorized() {
        let (creatures, _, state) = test_state();
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/creatures")
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value["message"],
            "authentication required: invalid or expired token"
        );
        let stored = creatures.find_by_pokedex_number(133).await.expect("stub");
        assert!(stored.is_none(), "no write without a token");
    }

    #[actix_web::test]
    async fn create_with_a_token_persists_and_returns_the_entity() {
        let (_, _, state) = test_state();
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/creatures")
                .insert_header(("Authorization", format!("Bearer {}", valid_token())))
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["name"], "Eevee");
        assert_eq!(value["pokedexNumber"], 133);
        assert!(value.get("id").is_some());
        assert!(value.get("createdAt").is_some());
    }

    #[actix_web::test]
    async fn create_with_a_duplicate_pokedex_number_conflicts() {
        let (creatures, _, state) = test_state();
        let _ = creatures.insert_creature(sample_draft(Some(133), "Eevee", 30, 65));
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/creatures")
                .insert_header(("Authorization", format!("Bearer {}", valid_token())))
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "conflict");
    }

    #[rstest]
    #[case(json!({ "name": "   " }), "name")]
    #[case(json!({ "types": [] }), "type")]
    #[actix_web::test]
    async fn create_validation_failures_are_bad_requests(
        #[case] overrides: Value,
        #[case] expected_fragment: &str,
    ) {
        let (_, _, state) = test_state();
        let app = test_app!(state);

        let mut body = create_body();
        if let (Some(base), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/creatures")
                .insert_header(("Authorization", format!("Bearer {}", valid_token())))
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        let message = value["message"].as_str().expect("message string");
        assert!(
            message.contains(expected_fragment),
            "expected `{expected_fragment}` in `{message}`"
        );
    }

    #[actix_web::test]
    async fn patch_changes_only_the_supplied_fields() {
        let (creatures, _, state) = test_state();
        let _ = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/creatures/25")
                .insert_header(("Authorization", format!("Bearer {}", valid_token())))
                .set_json(json!({ "weight": 61 }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["weight"], 61);
        assert_eq!(value["name"], "Pikachu");
        assert_eq!(value["height"], 40);
        assert_eq!(value["types"], json!(["Electric"]));
    }

    #[actix_web::test]
    async fn patch_that_empties_the_type_list_is_rejected() {
        let (creatures, _, state) = test_state();
        let _ = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/creatures/25")
                .insert_header(("Authorization", format!("Bearer {}", valid_token())))
                .set_json(json!({ "types": [] }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_removes_the_creature() {
        let (creatures, _, state) = test_state();
        let pikachu = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/creatures/{}", pikachu.id()))
                .insert_header(("Authorization", format!("Bearer {}", valid_token())))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let follow_up = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/creatures/25")
                .to_request(),
        )
        .await;
        assert_eq!(follow_up.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case(actix_test::TestRequest::patch(), "/api/v1/creatures/25")]
    #[case(actix_test::TestRequest::delete(), "/api/v1/creatures/25")]
    #[actix_web::test]
    async fn mutations_with_garbled_tokens_are_unauthorized(
        #[case] request: actix_test::TestRequest,
        #[case] uri: &str,
    ) {
        let (creatures, _, state) = test_state();
        let _ = creatures.insert_creature(sample_draft(Some(25), "Pikachu", 40, 60));
        let app = test_app!(state);

        let response = actix_test::call_service(
            &app,
            request
                .uri(uri)
                .insert_header(("Authorization", "Bearer garbled"))
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! Product catalog routes
//!
//! Catalog reads are public; create/update/delete require the ADMIN role.
//! Product payloads arrive as multipart: a `product` JSON part plus an
//! `imageFile` part (optional on update, where the stored image is kept).

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::repositories::StoredImage;
use crate::routes::reviews;
use crate::services::{ProductService, UploadedImage};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use nexuskart_shared::types::{
    ProductListQuery, ProductRequest, ProductResponse, ProductSummary, SearchQuery,
};
use uuid::Uuid;

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/image", get(get_product_image))
        .route(
            "/:id/reviews",
            get(reviews::list_reviews).post(reviews::add_review),
        )
}

/// List the catalog
///
/// GET /api/v1/products?page&size&category&keyword
///
/// Without `page` the full catalog is returned; with it, one page wrapped
/// in pagination metadata. A category filter takes precedence over a
/// keyword.
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Response> {
    if query.page.is_some() {
        let page = ProductService::list_page(&state.db, &query).await?;
        Ok(Json(page).into_response())
    } else {
        let products = ProductService::list_all(&state.db).await?;
        Ok(Json(products).into_response())
    }
}

/// Keyword search over the catalog
///
/// GET /api/v1/products/search?keyword=
async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ProductSummary>>> {
    let results = ProductService::search(&state.db, &query.keyword).await?;
    Ok(Json(results))
}

/// Fetch a single product
///
/// GET /api/v1/products/:id
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProductResponse>> {
    let product = ProductService::get(&state.db, id).await?;
    Ok(Json(product))
}

/// Create a product (ADMIN only)
///
/// POST /api/v1/products
async fn create_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let (req, image) = parse_product_multipart(multipart).await?;
    let image =
        image.ok_or_else(|| ApiError::BadRequest("Missing imageFile part".to_string()))?;

    let product = ProductService::create(&state.db, req, image).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (ADMIN only)
///
/// PUT /api/v1/products/:id
async fn update_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<Json<ProductResponse>> {
    let (req, image) = parse_product_multipart(multipart).await?;
    let product = ProductService::update(&state.db, id, req, image).await?;
    Ok(Json(product))
}

/// Delete a product (ADMIN only)
///
/// DELETE /api/v1/products/:id
async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    ProductService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a product's image
///
/// GET /api/v1/products/:id/image
///
/// Product images are immutable enough to cache aggressively.
async fn get_product_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let image = ProductService::get_image(&state.db, id).await?;
    Ok(image_response(image, true))
}

/// Build a raw image response with the stored content type
pub(crate) fn image_response(image: StoredImage, cacheable: bool) -> Response {
    let content_type = HeaderValue::from_str(&image.image_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let mut response = Response::new(Body::from(image.image_data));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    if cacheable {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("max-age=31536000"),
        );
    }
    response
}

/// Pull the `product` JSON part and optional `imageFile` part out of a
/// multipart body
pub(crate) async fn parse_product_multipart(
    mut multipart: Multipart,
) -> Result<(ProductRequest, Option<UploadedImage>), ApiError> {
    let mut product: Option<ProductRequest> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("product") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid product part: {}", e)))?;
                product = Some(
                    serde_json::from_str(&text)
                        .map_err(|e| ApiError::BadRequest(format!("Invalid product JSON: {}", e)))?,
                );
            }
            Some("imageFile") => {
                image = Some(read_image_field(field).await?);
            }
            _ => {}
        }
    }

    let product =
        product.ok_or_else(|| ApiError::BadRequest("Missing product part".to_string()))?;
    Ok((product, image))
}

/// Read an image field into an [`UploadedImage`]
pub(crate) async fn read_image_field(
    field: axum::extract::multipart::Field<'_>,
) -> Result<UploadedImage, ApiError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid image upload: {}", e)))?
        .to_vec();

    if data.is_empty() {
        return Err(ApiError::BadRequest("Image file is empty".to_string()));
    }

    Ok(UploadedImage {
        file_name,
        content_type,
        data,
    })
}

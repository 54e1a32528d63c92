//! Book inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, UpdateBook},
};

use super::ApiResponse;

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in the inventory", body = ApiResponse<Vec<Book>>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<Book>>>> {
    let books = state.services.inventory.list_books()?;
    Ok(Json(ApiResponse::ok(books, "Books retrieved successfully")))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = u64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "The requested book", body = ApiResponse<Book>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.inventory.get_book(id)?;
    Ok(Json(ApiResponse::ok(book, "Book retrieved successfully")))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = ApiResponse<Book>),
        (status = 400, description = "Invalid input or duplicate ISBN", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<ApiResponse<Book>>)> {
    let created = state.services.inventory.create_book(request)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(created, "Book created successfully")),
    ))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = u64, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = ApiResponse<Book>),
        (status = 400, description = "Invalid input or duplicate ISBN", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let updated = state.services.inventory.update_book(id, request)?;
    Ok(Json(ApiResponse::ok(updated, "Book updated successfully")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = u64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = ApiResponse<Book>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let removed = state.services.inventory.delete_book(id)?;
    Ok(Json(ApiResponse::ok(removed, "Book deleted successfully")))
}

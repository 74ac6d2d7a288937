use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    errors::ServerError,
    lifecycle::NoteService,
    models::note::{CreateNoteRequest, NoteAccessRequest, UpdateNoteRequest},
};

pub async fn create(
    input: web::Json<CreateNoteRequest>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    let note = input.into_inner().validate()?;
    let note_id = web::block(move || service.create(note)).await??;

    Ok(HttpResponse::Ok().json(json!({
        "id": note_id,
        "message": "note created",
    })))
}

pub async fn get(
    input: web::Json<NoteAccessRequest>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    let access = input.into_inner().validate()?;
    let note = web::block(move || service.read(access)).await??;

    Ok(HttpResponse::Ok().json(note))
}

pub async fn update(
    input: web::Json<UpdateNoteRequest>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    let update = input.into_inner().validate()?;
    let note_id = web::block(move || service.update(update)).await??;

    Ok(HttpResponse::Ok().json(json!({
        "id": note_id,
        "message": "note updated",
    })))
}

pub async fn delete(
    input: web::Json<NoteAccessRequest>,
    service: web::Data<NoteService>,
) -> Result<HttpResponse, ServerError> {
    let access = input.into_inner().validate()?;
    web::block(move || service.delete(access)).await??;

    Ok(HttpResponse::Ok().json(json!({ "message": "note deleted" })))
}

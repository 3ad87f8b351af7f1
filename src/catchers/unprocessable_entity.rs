use rocket::response::status;
use rocket::response::status::BadRequest;
use rocket::Request;

/// Rocket answers undeserializable JSON with 422; clients get a plain 400.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(req: &Request) -> BadRequest<()> {
    tracing::warn!(path = %req.uri(), "Rejected a malformed request body.");
    status::BadRequest(())
}

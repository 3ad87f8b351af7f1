use crate::domain::MessageEnvelope;
use crate::email::{DeliveryError, Dispatcher};
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, Response, State};
use uuid::Uuid;

#[tracing::instrument(
    name = "Delivering an email",
    skip(envelope, dispatcher),
    fields(
        request_id = %Uuid::new_v4(),
        recipients = ?envelope.to,
        subject = %envelope.subject
    )
)]
#[post("/deliveries", data = "<envelope>")]
pub async fn deliver(
    envelope: Json<MessageEnvelope>,
    dispatcher: &State<Dispatcher>,
) -> Result<(), DeliveryError> {
    dispatcher.deliver(&envelope).await
}

impl<'r> Responder<'r, 'static> for DeliveryError {
    fn respond_to(self, _request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("DeliveryError: {:?}", self);
        Response::build()
            .status(match self {
                DeliveryError::InvalidEnvelope(_) | DeliveryError::InvalidAddress(_) => {
                    Status::BadRequest
                }
                DeliveryError::Transport(_) | DeliveryError::BulkDeliveryRejected => {
                    Status::BadGateway
                }
            })
            .ok()
    }
}

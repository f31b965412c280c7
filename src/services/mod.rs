//! External collaborators: language model, OpenStreetMap lookups, payments.

pub mod llm;
pub mod openai_client;
pub mod openstreetmap;
pub mod payments;
pub mod prompts;

pub use llm::{OpenAiCompletion, TextCompletion};
pub use openai_client::OpenAIClient;
pub use openstreetmap::{
    category_filters, Geocoder, NominatimGeocoder, OverpassPoiSource, PoiSource,
};
pub use payments::{
    BookingConfirmation, MockPaymentGateway, PaymentGateway, PaymentReceipt, PaymentStatus,
};

//! Client-side contact form logic: field state, validation, résumé file
//! handling, and single-shot submission to the delivery gateway.
//!
//! The controller owns no UI. It is wired up with a [`DeliveryGateway`]
//! (the HTTP call to the backend) and a [`Notifier`] (the toast surface),
//! both injected so every outcome path is testable.

pub mod controller;
pub mod error;
pub mod file;
pub mod gateway;
pub mod notify;

pub use controller::{ContactForm, Field};
pub use error::FormError;
pub use file::ResumeFile;
pub use gateway::{
    DeliveryGateway, HttpDeliveryGateway, SubmissionAttachment, SubmissionRequest,
    SubmissionResult,
};
pub use notify::{NoticeKind, Notifier};

//! # pagewright-api
//!
//! REST API server for the pagewright library
//!

mod api;
pub use api::{
    app, build_pdf, create_pdf, health_check, AppError, BuildPdfRequest, CreatePdfRequest,
    ErrorResponse, PageRequest,
};

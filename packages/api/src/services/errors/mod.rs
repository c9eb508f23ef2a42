pub mod history_service_errors;

mod basic_integration;
mod http_api;

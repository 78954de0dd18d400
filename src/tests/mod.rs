mod error_tests;
mod mapper_tests;
mod ratelimit_tests;
mod template_tests;

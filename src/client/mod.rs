pub mod atlassian_client;
pub mod graphql;
pub mod pagination;
pub mod ratelimit;
pub mod templates;
pub mod transport;

pub use atlassian_client::{AtlassianClient, TeamPage};
pub use graphql::{basic_auth_header, Execution, GraphQLClient};
pub use pagination::{page_size, PageOptions};
pub use templates::{QueryTemplate, TeamSearchVariables, TemplateStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

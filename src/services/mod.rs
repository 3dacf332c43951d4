pub mod auth_service;
pub mod person_graph_service;
pub mod relationship_type_service;
pub mod unsubscribe_service;

pub use auth_service::{AuthService, AuthenticatedUser};
pub use person_graph_service::PersonGraphService;
pub use relationship_type_service::RelationshipTypeService;
pub use unsubscribe_service::UnsubscribeService;

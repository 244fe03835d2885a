mod rest_contact_repository;
mod traits;

pub use rest_contact_repository::RestContactRepository;
pub use traits::ContactRepository;

mod acl;

pub use acl::{AdminAclMiddlewareFactory, AdminAclMiddlewareService};

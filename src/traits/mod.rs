//! Trait definitions for App Store Connect operations.
//!
//! Each resource kind implements the traits its endpoints support. The
//! default method bodies derive paths from the kind's `type` tag, which is
//! also its collection path, so most implementations only pick a query type.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::{get_related, Get};
pub use list::{List, DEFAULT_PAGE_SIZE};
pub use update::Update;

use crate::envelope::ResourceKind;

/// Collection path of kind `K`, e.g. `appPreviews`.
pub(crate) fn collection_path<K: ResourceKind>() -> String {
    K::TYPE.to_string()
}

/// Instance path of kind `K`, e.g. `appPreviews/abc`.
pub(crate) fn instance_path<K: ResourceKind>(id: &str) -> String {
    format!("{}/{}", K::TYPE, urlencoding::encode(id))
}

/// Path of a to-one related resource, e.g. `apps/123/betaLicenseAgreement`.
pub(crate) fn related_path<K: ResourceKind>(id: &str, relationship: &str) -> String {
    format!("{}/{}", instance_path::<K>(id), relationship)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{App, AppPreview};

    #[test]
    fn test_paths_follow_type_tag() {
        assert_eq!(collection_path::<AppPreview>(), "appPreviews");
        assert_eq!(instance_path::<AppPreview>("p-1"), "appPreviews/p-1");
        assert_eq!(
            related_path::<App>("42", "betaLicenseAgreement"),
            "apps/42/betaLicenseAgreement"
        );
    }

    #[test]
    fn test_instance_path_encodes_id() {
        assert_eq!(instance_path::<App>("a/b c"), "apps/a%2Fb%20c");
    }
}

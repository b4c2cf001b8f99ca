use crate::domain::{entities::common::RelativePath, value_objects::Framework};

use super::framework_profile;

/// Package directory of the emitted credential classes.
pub const CREDENTIALS_PACKAGE_DIR: &str = "src/main/java/application/bluemix";

const BLUEMIX_CREDENTIALS: &str = include_str!("../../../resources/java/BluemixCredentials.java");
const INVALID_CREDENTIALS: &str =
    include_str!("../../../resources/java/InvalidCredentialsException.java");
const SERVICE_NAME: &str = include_str!("../../../resources/java/ServiceName.java");

pub(super) const VCAP_SERVICES_LIBERTY: &str =
    include_str!("../../../resources/java/VCAPServices.liberty.java");
pub(super) const VCAP_SERVICES_SPRING: &str =
    include_str!("../../../resources/java/VCAPServices.spring.java");

/// File name of the framework-specific source.
pub const VCAP_SERVICES_FILE: &str = "VCAPServices.java";

/// One emitted credential-handling source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialSource {
    pub file_name: &'static str,
    pub content: &'static str,
}

impl CredentialSource {
    pub fn path(&self) -> RelativePath {
        RelativePath::new(format!("{CREDENTIALS_PACKAGE_DIR}/{}", self.file_name))
    }
}

/// The four credential sources, with the framework's `VCAPServices` variant.
pub fn credential_sources(framework: Framework) -> [CredentialSource; 4] {
    [
        CredentialSource {
            file_name: "BluemixCredentials.java",
            content: BLUEMIX_CREDENTIALS,
        },
        CredentialSource {
            file_name: "InvalidCredentialsException.java",
            content: INVALID_CREDENTIALS,
        },
        CredentialSource {
            file_name: "ServiceName.java",
            content: SERVICE_NAME,
        },
        vcap_services(framework),
    ]
}

/// The framework's `VCAPServices.java` variant.
pub fn vcap_services(framework: Framework) -> CredentialSource {
    CredentialSource {
        file_name: VCAP_SERVICES_FILE,
        content: framework_profile(framework).vcap_services_source(),
    }
}

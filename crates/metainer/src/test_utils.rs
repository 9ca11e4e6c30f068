use crate::config::MetainerConfig;
use crate::mixin::{Attributes, Metainer};
use crate::record::Fields;
use crate::value::MetaValue;

/// Minimal host type for exercising the metadata layer.
#[derive(Debug, Default)]
pub struct TestHost {
    pub attrs: Attributes,
}

impl Metainer for TestHost {
    fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }
}

pub struct HostFixture {
    pub host: TestHost,
}

impl Default for HostFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFixture {
    pub fn new() -> Self {
        Self {
            host: TestHost::default(),
        }
    }

    pub fn with_config(config: MetainerConfig) -> Self {
        Self {
            host: TestHost {
                attrs: Attributes::with_config(config),
            },
        }
    }

    /// Configure mount keys the way a host does it: by assigning the
    /// reserved mounts slot.
    pub fn with_mounts(mut self, keys: &[&str]) -> Self {
        let mounts_key = self.host.attrs.config().mounts_key.clone();
        self.host.assign(&mounts_key, keys.to_vec());
        self
    }

    pub fn with_value(mut self, name: &str, value: impl Into<MetaValue>) -> Self {
        self.host.assign(name, value);
        self
    }

    pub fn with_annotated(
        mut self,
        name: &str,
        value: impl Into<MetaValue>,
        fields: Fields,
    ) -> Self {
        self.host.set(name, value, fields);
        self
    }
}

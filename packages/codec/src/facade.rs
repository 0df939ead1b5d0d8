//! The codec registry facade: every family's sealed registry in one value.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use ledgerwire_wire::Value;
use serde::Serialize;
use tracing::debug;

use crate::{
    CodecConfig, DiscriminatedCodec, Error, Family, ParamEnvelope, RegistryError,
    ShapeDescriptor, TagConvention, UnknownPolicy, VariantRegistry,
};

/// Summary of one installed family, for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FamilyCatalog {
    pub name: &'static str,
    /// The tag property, or `None` for families with inferred discriminators.
    pub tag: Option<&'static str>,
    pub discriminators: Vec<String>,
}

impl fmt::Display for FamilyCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{} (tag {:?}):", self.name, tag)?,
            None => write!(f, "{} (inferred):", self.name)?,
        }
        for discriminator in &self.discriminators {
            write!(f, " {}", discriminator)?;
        }
        Ok(())
    }
}

/// Object-safe view of a `VariantRegistry<F>` for heterogeneous storage.
trait FamilySlot: Send + Sync {
    fn seal(&mut self);

    fn catalog(&self) -> FamilyCatalog;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<F: Family> FamilySlot for VariantRegistry<F> {
    fn seal(&mut self) {
        VariantRegistry::seal(self)
    }

    fn catalog(&self) -> FamilyCatalog {
        let mut discriminators: Vec<String> =
            self.discriminators().map(str::to_string).collect();
        discriminators.sort();
        FamilyCatalog {
            name: F::NAME,
            tag: match F::TAG {
                TagConvention::Field(tag) => Some(tag),
                TagConvention::Inferred(_) => None,
            },
            discriminators,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Read-only lookup over every family's registry.
///
/// Built once at startup through [`CodecRegistryBuilder`] and then shared by
/// reference (or inside an `Arc`). Every registry it holds is sealed.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = CodecRegistry::builder();
/// builder.known::<LedgerEntry>()?;
/// builder.known::<Transaction>()?;
/// let registry = builder.build();
///
/// let tx: Transaction = registry.decode(&wire)?;
/// ```
pub struct CodecRegistry {
    families: HashMap<TypeId, Box<dyn FamilySlot>>,
    config: CodecConfig,
}

impl CodecRegistry {
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The sealed registry for `F`, if installed.
    pub fn family<F: Family>(&self) -> Option<&VariantRegistry<F>> {
        self.families
            .get(&TypeId::of::<F>())?
            .as_any()
            .downcast_ref::<VariantRegistry<F>>()
    }

    /// A codec for `F` with an explicit policy.
    pub fn codec<F: Family>(
        &self,
        policy: UnknownPolicy,
    ) -> Result<DiscriminatedCodec<'_, F>, Error> {
        let registry = self
            .family::<F>()
            .ok_or(Error::UnknownFamily { family: F::NAME })?;
        Ok(DiscriminatedCodec::new(registry, policy))
    }

    /// The configured unknown-discriminator policy for `F`.
    pub fn policy_for<F: Family>(&self) -> UnknownPolicy {
        self.config.policy_for(F::NAME)
    }

    /// Decode with the configured policy for `F`.
    pub fn decode<F: Family>(&self, wire: &Value) -> Result<F, Error> {
        let codec = self.codec::<F>(self.policy_for::<F>())?;
        Ok(codec.decode(wire)?)
    }

    pub fn encode<F: Family>(&self, value: &F) -> Result<Value, Error> {
        let codec = self.codec::<F>(self.policy_for::<F>())?;
        Ok(codec.encode(value)?)
    }

    /// An empty parameter envelope in the configured mode.
    pub fn envelope(&self) -> ParamEnvelope {
        ParamEnvelope::new(self.config.envelope_mode)
    }

    /// Installed family names, sorted.
    pub fn families(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.families.values().map(|slot| slot.catalog().name).collect();
        names.sort_unstable();
        names
    }

    /// Catalogue of every installed family, sorted by name.
    pub fn describe(&self) -> Vec<FamilyCatalog> {
        let mut catalog: Vec<_> = self.families.values().map(|slot| slot.catalog()).collect();
        catalog.sort_by(|a, b| a.name.cmp(b.name));
        catalog
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("families", &self.describe())
            .field("config", &self.config)
            .finish()
    }
}

/// Assembles a [`CodecRegistry`].
#[derive(Default)]
pub struct CodecRegistryBuilder {
    families: HashMap<TypeId, Box<dyn FamilySlot>>,
    config: CodecConfig,
}

impl CodecRegistryBuilder {
    pub fn config(&mut self, config: CodecConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Install a registry built elsewhere.
    pub fn install<F: Family>(
        &mut self,
        registry: VariantRegistry<F>,
    ) -> Result<(), RegistryError> {
        let key = TypeId::of::<F>();
        if self.families.contains_key(&key) {
            return Err(RegistryError::DuplicateFamily { family: F::NAME });
        }
        debug!(family = F::NAME, shapes = registry.len(), "installed family");
        self.families.insert(key, Box::new(registry));
        Ok(())
    }

    /// Install `F` with every shape its enum declares.
    pub fn known<F: Family>(&mut self) -> Result<(), RegistryError> {
        self.install(VariantRegistry::<F>::with_known()?)
    }

    /// Register one shape for `F`, creating the family's registry on first use.
    pub fn register<F: Family>(
        &mut self,
        discriminator: impl Into<String>,
        descriptor: ShapeDescriptor<F>,
    ) -> Result<(), RegistryError> {
        self.registry_mut::<F>()?.register(discriminator, descriptor)
    }

    /// Seal `F`'s registry ahead of `build`.
    pub fn seal<F: Family>(&mut self) -> Result<(), RegistryError> {
        self.registry_mut::<F>()?.seal();
        Ok(())
    }

    /// Seal every registry and freeze the set of families.
    pub fn build(self) -> CodecRegistry {
        let mut families = self.families;
        for slot in families.values_mut() {
            slot.seal();
        }
        CodecRegistry {
            families,
            config: self.config,
        }
    }

    fn registry_mut<F: Family>(&mut self) -> Result<&mut VariantRegistry<F>, RegistryError> {
        self.families
            .entry(TypeId::of::<F>())
            .or_insert_with(|| Box::new(VariantRegistry::<F>::new()) as Box<dyn FamilySlot>)
            .as_any_mut()
            .downcast_mut::<VariantRegistry<F>>()
            .ok_or(RegistryError::DuplicateFamily { family: F::NAME })
    }
}

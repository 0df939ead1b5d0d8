//! The variant registry: discriminator -> shape descriptor, per family.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::debug;

use crate::field::Field;
use crate::{Family, Member, RegistryError, Shape, ShapeDescriptor};

/// One registered shape: its discriminator and descriptor.
#[derive(Debug)]
pub struct Registration<F> {
    discriminator: String,
    descriptor: ShapeDescriptor<F>,
}

impl<F> Registration<F> {
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn descriptor(&self) -> &ShapeDescriptor<F> {
        &self.descriptor
    }
}

/// The known shapes of family `F`.
///
/// Built during startup with `register`, then sealed. A sealed registry never
/// changes and can be shared across threads without locking.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = VariantRegistry::<LedgerEntry>::new();
/// registry.register("Escrow", ShapeDescriptor::of::<Escrow>())?;
/// registry.seal();
///
/// assert!(registry.lookup_by_discriminator("Escrow").is_some());
/// ```
#[derive(Debug)]
pub struct VariantRegistry<F: Family> {
    registrations: Vec<Registration<F>>,
    by_discriminator: HashMap<String, usize>,
    by_type: HashMap<TypeId, usize>,
    base: Vec<Field<F::Base>>,
    sealed: bool,
}

impl<F: Family> VariantRegistry<F> {
    /// An empty, unsealed registry.
    pub fn new() -> Self {
        VariantRegistry {
            registrations: Vec::new(),
            by_discriminator: HashMap::new(),
            by_type: HashMap::new(),
            base: F::Base::fields(),
            sealed: false,
        }
    }

    /// A sealed registry holding every shape the family enum declares.
    pub fn with_known() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        F::register_known(&mut registry)?;
        registry.seal();
        Ok(registry)
    }

    /// Map `discriminator` to `descriptor`.
    ///
    /// The first mapping for a discriminator wins; later attempts fail and
    /// leave the registry untouched.
    pub fn register(
        &mut self,
        discriminator: impl Into<String>,
        descriptor: ShapeDescriptor<F>,
    ) -> Result<(), RegistryError> {
        let discriminator = discriminator.into();

        if self.sealed {
            return Err(RegistryError::Frozen { family: F::NAME });
        }
        if self.by_discriminator.contains_key(&discriminator) {
            return Err(RegistryError::DuplicateDiscriminator {
                family: F::NAME,
                discriminator,
            });
        }
        if let Some(&existing) = self.by_type.get(&descriptor.type_id()) {
            return Err(RegistryError::DuplicateType {
                family: F::NAME,
                type_name: descriptor.type_name(),
                existing: self.registrations[existing].discriminator.clone(),
            });
        }

        debug!(
            family = F::NAME,
            discriminator = %discriminator,
            shape = descriptor.type_name(),
            "registered shape"
        );

        let index = self.registrations.len();
        self.by_discriminator.insert(discriminator.clone(), index);
        self.by_type.insert(descriptor.type_id(), index);
        self.registrations.push(Registration {
            discriminator,
            descriptor,
        });
        Ok(())
    }

    /// Register `S` under its declared discriminator.
    pub fn register_member<S: Member<F>>(&mut self) -> Result<(), RegistryError> {
        self.register(S::DISCRIMINATOR, ShapeDescriptor::of::<S>())
    }

    /// Freeze the registry. Sealing twice is a no-op.
    pub fn seal(&mut self) {
        if !self.sealed {
            self.sealed = true;
            debug!(family = F::NAME, shapes = self.registrations.len(), "sealed registry");
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn lookup_by_discriminator(&self, tag: &str) -> Option<&Registration<F>> {
        self.by_discriminator
            .get(tag)
            .map(|&index| &self.registrations[index])
    }

    pub fn lookup_by_type(&self, type_id: TypeId) -> Option<&Registration<F>> {
        self.by_type
            .get(&type_id)
            .map(|&index| &self.registrations[index])
    }

    /// Registered discriminators, in registration order.
    pub fn discriminators(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.discriminator.as_str())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub(crate) fn base_fields(&self) -> &[Field<F::Base>] {
        &self.base
    }
}

impl<F: Family> Default for VariantRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Check, Escrow, LedgerEntry, Offer};

    #[test]
    fn register_and_lookup() {
        let mut registry = VariantRegistry::<LedgerEntry>::new();
        registry
            .register("Escrow", ShapeDescriptor::of::<Escrow>())
            .unwrap();
        registry.register_member::<Offer>().unwrap();

        let escrow = registry.lookup_by_discriminator("Escrow").unwrap();
        assert_eq!(escrow.descriptor().type_id(), TypeId::of::<Escrow>());

        let offer = registry.lookup_by_type(TypeId::of::<Offer>()).unwrap();
        assert_eq!(offer.discriminator(), "Offer");

        assert!(registry.lookup_by_discriminator("Check").is_none());
        assert!(registry.lookup_by_type(TypeId::of::<Check>()).is_none());
        assert_eq!(registry.discriminators().collect::<Vec<_>>(), ["Escrow", "Offer"]);
    }

    #[test]
    fn duplicate_discriminator_keeps_first_mapping() {
        let mut registry = VariantRegistry::<LedgerEntry>::new();
        registry
            .register("Escrow", ShapeDescriptor::of::<Escrow>())
            .unwrap();

        let err = registry
            .register("Escrow", ShapeDescriptor::of::<Offer>())
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateDiscriminator {
                family: "ledger entry",
                discriminator: "Escrow".to_string(),
            }
        );
        assert_eq!(registry.len(), 1);
        let kept = registry.lookup_by_discriminator("Escrow").unwrap();
        assert_eq!(kept.descriptor().type_id(), TypeId::of::<Escrow>());
        assert!(registry.lookup_by_type(TypeId::of::<Offer>()).is_none());
    }

    #[test]
    fn same_type_under_two_discriminators_is_rejected() {
        let mut registry = VariantRegistry::<LedgerEntry>::new();
        registry.register_member::<Escrow>().unwrap();

        let err = registry
            .register("EscrowAlias", ShapeDescriptor::of::<Escrow>())
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::DuplicateType { ref existing, .. } if existing == "Escrow"
        ));
    }

    #[test]
    fn sealed_registry_rejects_registration() {
        let mut registry = VariantRegistry::<LedgerEntry>::new();
        registry.register_member::<Escrow>().unwrap();
        registry.seal();
        registry.seal();

        assert!(registry.is_sealed());
        assert_eq!(
            registry.register_member::<Offer>(),
            Err(RegistryError::Frozen {
                family: "ledger entry"
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn with_known_registers_every_variant() {
        let registry = VariantRegistry::<LedgerEntry>::with_known().unwrap();
        assert!(registry.is_sealed());
        assert_eq!(
            registry.discriminators().collect::<Vec<_>>(),
            ["Escrow", "Offer", "Check"]
        );
    }
}

//! The field populator: walks a target's declared fields and fills each one.

use crate::config::FactoryConfig;
use crate::descriptor::Fixture;
use crate::error::ConstructionError;
use crate::policy;

/// Populate every supported field of `instance` in place.
///
/// Fields with an unsupported declared type are skipped silently; this is
/// documented behavior, not an error. An assignment failure aborts the
/// pass, so a partially filled instance is never reported as success.
/// Field order is unspecified.
pub fn populate<T: Fixture>(
    instance: &mut T,
    randomize: bool,
    rng: &mut dyn rand::RngCore,
    config: &FactoryConfig,
) -> Result<(), ConstructionError> {
    for field in T::fields() {
        if config.verbose {
            eprintln!("field name: {} field type: {:?}", field.name, field.tag);
        }
        if let Some(value) = policy::value_for(field.tag, randomize, rng, config) {
            instance.assign(field.name, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Constructibility, FieldDescriptor, FieldValue, TypeTag};
    use crate::rng::create_seeded_rng;

    // Hand-written impl of what the derive macro generates; generated code
    // names the crate by its external path, which does not resolve here.
    #[derive(Debug, Default)]
    struct Gadget {
        label: String,
        mass: f64,
        tags: Vec<String>,
    }

    impl Fixture for Gadget {
        const NAME: &'static str = "Gadget";

        fn constructibility() -> Constructibility<Self> {
            Constructibility::Direct(|| Ok(Gadget::default()))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor {
                    name: "label",
                    tag: TypeTag::Str,
                },
                FieldDescriptor {
                    name: "mass",
                    tag: TypeTag::Double,
                },
                FieldDescriptor {
                    name: "tags",
                    tag: TypeTag::Unsupported,
                },
            ];
            FIELDS
        }

        fn assign(&mut self, field: &str, value: FieldValue) -> Result<(), ConstructionError> {
            match (field, value) {
                ("label", FieldValue::Str(v)) => {
                    self.label = v;
                    Ok(())
                }
                ("mass", FieldValue::Double(v)) => {
                    self.mass = v;
                    Ok(())
                }
                (field, value) => Err(ConstructionError::field_assignment(
                    Self::NAME,
                    field,
                    format!("no writable field accepts a {:?} value", value.tag()),
                )),
            }
        }
    }

    // Rejects every assignment, to exercise the abort path.
    #[derive(Debug, Default)]
    struct Stubborn {
        value: i32,
    }

    impl Fixture for Stubborn {
        const NAME: &'static str = "Stubborn";

        fn constructibility() -> Constructibility<Self> {
            Constructibility::Direct(|| Ok(Stubborn::default()))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
                name: "value",
                tag: TypeTag::Int,
            }];
            FIELDS
        }

        fn assign(&mut self, field: &str, _value: FieldValue) -> Result<(), ConstructionError> {
            Err(ConstructionError::field_assignment(
                Self::NAME,
                field,
                "sealed",
            ))
        }
    }

    #[test]
    fn fixed_pass_fills_supported_fields_and_skips_the_rest() {
        let mut gadget = Gadget {
            label: "old".to_string(),
            mass: 9.5,
            tags: vec!["keep".to_string()],
        };
        let mut rng = create_seeded_rng(0);
        populate(&mut gadget, false, &mut rng, &FactoryConfig::default()).unwrap();

        assert_eq!(gadget.label, "");
        assert_eq!(gadget.mass, 0.0);
        assert_eq!(gadget.tags, vec!["keep".to_string()]);
    }

    #[test]
    fn randomized_pass_draws_from_the_given_source() {
        let mut gadget = Gadget::default();
        let mut rng = create_seeded_rng(42);
        populate(&mut gadget, true, &mut rng, &FactoryConfig::default()).unwrap();

        assert_eq!(gadget.label.len(), 10);
        assert!((0.0..1.0).contains(&gadget.mass));
    }

    #[test]
    fn assignment_failure_aborts_the_pass() {
        let mut stubborn = Stubborn::default();
        let mut rng = create_seeded_rng(0);
        let err = populate(&mut stubborn, false, &mut rng, &FactoryConfig::default()).unwrap_err();
        assert!(err.to_string().contains("sealed"));
        assert_eq!(stubborn.value, 0);
    }
}

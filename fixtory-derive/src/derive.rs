//! Implementation of the `Fixture` derive.
//!
//! The macro inspects a struct's declared fields, maps each declared type
//! to a type tag (or "unsupported"), and emits the descriptor impl the
//! factory engine dispatches on: constructor shape, field enumeration,
//! and field assignment.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, Ident, PathArguments,
    Result, Type, parse_macro_input,
};

/// Main entry point for the Fixture derive macro
pub fn derive_fixture_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_fixture_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Type tags the engine can populate, mirrored locally for codegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Str,
    Any,
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Tag {
    /// Variant name shared by `TypeTag` and `FieldValue` in the core crate.
    fn ident(self) -> Ident {
        let name = match self {
            Tag::Str => "Str",
            Tag::Any => "Any",
            Tag::Bool => "Bool",
            Tag::Byte => "Byte",
            Tag::Char => "Char",
            Tag::Short => "Short",
            Tag::Int => "Int",
            Tag::Long => "Long",
            Tag::Float => "Float",
            Tag::Double => "Double",
        };
        format_ident!("{}", name)
    }
}

#[derive(Clone, Copy)]
enum FieldKind {
    /// Populated by the value policy; `optional` fields receive `Some(value)`.
    Value { tag: Tag, optional: bool },
    /// Enumerated but never populated.
    Unsupported,
    /// Owner reference of a nested type; set during construction only.
    Owner,
}

struct FieldInfo<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    kind: FieldKind,
}

/// Generate the Fixture implementation for the given input
fn generate_fixture_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Fixture derive does not support generic targets",
        ));
    }

    let data_struct = match &input.data {
        Data::Struct(data_struct) => data_struct,
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                name,
                "Fixture derive is only supported for structs",
            ));
        }
    };

    let no_default = !fixture_flags(&input.attrs, &["no_default"])?.is_empty();

    let fields: Vec<FieldInfo> = match &data_struct.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(classify_field)
            .collect::<Result<_>>()?,
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                name,
                "Fixture derive does not support tuple structs",
            ));
        }
    };

    let owners: Vec<&FieldInfo> = fields
        .iter()
        .filter(|field| matches!(field.kind, FieldKind::Owner))
        .collect();
    if owners.len() > 1 {
        return Err(Error::new_spanned(
            owners[1].ident,
            "only one field may be marked #[fixture(owner)]",
        ));
    }
    if no_default && !owners.is_empty() {
        return Err(Error::new_spanned(
            owners[0].ident,
            "#[fixture(no_default)] cannot be combined with an owner field",
        ));
    }

    let constructibility = constructibility_body(
        &name_str,
        &data_struct.fields,
        &fields,
        no_default,
        owners.first().copied(),
    );
    let descriptors = descriptor_entries(&fields);
    let assign_arms = assign_arms(&fields);

    Ok(quote! {
        impl fixtory::Fixture for #name {
            const NAME: &'static str = #name_str;

            fn constructibility() -> fixtory::Constructibility<Self> {
                #constructibility
            }

            fn fields() -> &'static [fixtory::FieldDescriptor] {
                const FIELDS: &[fixtory::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn assign(
                &mut self,
                field: &str,
                value: fixtory::FieldValue,
            ) -> Result<(), fixtory::ConstructionError> {
                match (field, value) {
                    #(#assign_arms)*
                    (field, value) => Err(fixtory::ConstructionError::field_assignment(
                        Self::NAME,
                        field,
                        format!("no writable field accepts a {:?} value", value.tag()),
                    )),
                }
            }
        }
    })
}

/// Pick the constructor shape and emit its body.
fn constructibility_body(
    name_str: &str,
    shape: &Fields,
    fields: &[FieldInfo],
    no_default: bool,
    owner: Option<&FieldInfo>,
) -> TokenStream {
    if no_default {
        return quote! { fixtory::Constructibility::NotConstructible };
    }

    if matches!(shape, Fields::Unit) {
        return quote! { fixtory::Constructibility::Direct(|| Ok(Self)) };
    }

    let inits: Vec<TokenStream> = fields
        .iter()
        .filter(|field| !matches!(field.kind, FieldKind::Owner))
        .map(field_init)
        .collect();

    match owner {
        None => quote! {
            fixtory::Constructibility::Direct(|| Ok(Self { #(#inits,)* }))
        },
        Some(owner) => {
            let owner_ident = owner.ident;
            let owner_ty = owner.ty;
            quote! {
                fixtory::Constructibility::NestedNeedsEnclosing {
                    enclosing: <#owner_ty as fixtory::Fixture>::NAME,
                    construct: || {
                        let owner = match <#owner_ty as fixtory::Fixture>::constructibility() {
                            fixtory::Constructibility::Direct(construct) => construct()?,
                            _ => {
                                return Err(
                                    fixtory::ConstructionError::enclosing_not_constructible(
                                        #name_str,
                                        <#owner_ty as fixtory::Fixture>::NAME,
                                    ),
                                );
                            }
                        };
                        Ok(Self {
                            #owner_ident: owner,
                            #(#inits,)*
                        })
                    },
                }
            }
        }
    }
}

/// Zero-value initializer for one field of the generated constructor.
fn field_init(field: &FieldInfo) -> TokenStream {
    let ident = field.ident;
    match field.kind {
        // A bare AnyValue has no Default impl; start it out as the empty payload.
        FieldKind::Value {
            tag: Tag::Any,
            optional: false,
        } => quote! { #ident: Box::new(()) },
        _ => quote! { #ident: Default::default() },
    }
}

/// Descriptor entries for every declared field except the owner reference.
fn descriptor_entries(fields: &[FieldInfo]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter_map(|field| {
            let name = field.ident.to_string();
            match field.kind {
                FieldKind::Value { tag, .. } => {
                    let tag_ident = tag.ident();
                    Some(quote! {
                        fixtory::FieldDescriptor { name: #name, tag: fixtory::TypeTag::#tag_ident }
                    })
                }
                FieldKind::Unsupported => Some(quote! {
                    fixtory::FieldDescriptor { name: #name, tag: fixtory::TypeTag::Unsupported }
                }),
                FieldKind::Owner => None,
            }
        })
        .collect()
}

/// Match arms assigning a policy value to each populatable field.
fn assign_arms(fields: &[FieldInfo]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident;
            let name = ident.to_string();
            let FieldKind::Value { tag, optional } = field.kind else {
                return None;
            };
            let variant = tag.ident();
            let arm = if optional {
                quote! {
                    (#name, fixtory::FieldValue::#variant(value)) => {
                        self.#ident = Some(value);
                        Ok(())
                    }
                }
            } else {
                quote! {
                    (#name, fixtory::FieldValue::#variant(value)) => {
                        self.#ident = value;
                        Ok(())
                    }
                }
            };
            Some(arm)
        })
        .collect()
}

/// Classify one named field from its declared type and attributes.
fn classify_field(field: &Field) -> Result<FieldInfo<'_>> {
    let ident = field.ident.as_ref().unwrap();
    let flags = fixture_flags(&field.attrs, &["owner", "skip"])?;
    let owner = flags.iter().any(|flag| flag == "owner");
    let skip = flags.iter().any(|flag| flag == "skip");

    if owner && skip {
        return Err(Error::new_spanned(
            ident,
            "#[fixture(owner)] and #[fixture(skip)] are mutually exclusive",
        ));
    }

    let kind = if owner {
        FieldKind::Owner
    } else if skip {
        FieldKind::Unsupported
    } else {
        match tag_for_type(&field.ty) {
            Some((tag, optional)) => FieldKind::Value { tag, optional },
            None => FieldKind::Unsupported,
        }
    };

    Ok(FieldInfo {
        ident,
        ty: &field.ty,
        kind,
    })
}

/// Collect `#[fixture(...)]` flags, rejecting anything not in `allowed`.
fn fixture_flags(attrs: &[Attribute], allowed: &[&str]) -> Result<Vec<String>> {
    let mut flags = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("fixture") {
            continue;
        }
        attr.parse_nested_meta(|meta| match meta.path.get_ident() {
            Some(ident) if allowed.contains(&ident.to_string().as_str()) => {
                flags.push(ident.to_string());
                Ok(())
            }
            _ => Err(meta.error("unsupported fixture attribute")),
        })?;
    }
    Ok(flags)
}

/// Map a declared type to its tag; `true` marks an `Option`-wrapped field.
fn tag_for_type(ty: &Type) -> Option<(Tag, bool)> {
    if let Some(inner) = option_inner(ty) {
        return scalar_tag(inner).map(|tag| (tag, true));
    }
    scalar_tag(ty).map(|tag| (tag, false))
}

fn scalar_tag(ty: &Type) -> Option<Tag> {
    match last_path_ident(ty)?.as_str() {
        "String" => Some(Tag::Str),
        "AnyValue" => Some(Tag::Any),
        "bool" => Some(Tag::Bool),
        "u8" => Some(Tag::Byte),
        "char" => Some(Tag::Char),
        "i16" => Some(Tag::Short),
        "i32" => Some(Tag::Int),
        "i64" => Some(Tag::Long),
        "f32" => Some(Tag::Float),
        "f64" => Some(Tag::Double),
        _ => None,
    }
}

fn last_path_ident(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .filter(|segment| segment.arguments.is_none())
            .map(|segment| segment.ident.to_string())
    } else {
        None
    }
}

/// The payload type of an `Option<T>` field, if the field is one.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

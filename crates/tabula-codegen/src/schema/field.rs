use super::ErrorSet;

#[derive(Debug)]
pub(crate) struct Field {
    /// Rust identifier of the field
    pub(crate) ident: syn::Ident,

    /// Field name as seen by the database layer (raw prefix stripped)
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: syn::Type,

    /// The `#[key]` attribute, if present
    pub(crate) key: Option<syn::Attribute>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut key = None;

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.push(syn::Error::new_spanned(attr, "expected `#[key]`"));
                } else {
                    key = Some(attr.clone());
                }
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_string();

        Ok(Self {
            ident: ident.clone(),
            name,
            ty: field.ty.clone(),
            key,
        })
    }
}

use super::{ErrorSet, Field, RecordAttr};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Record fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Index of the identity field
    pub(crate) key: Option<usize>,

    /// Optional table to map the record to
    pub(crate) table: Option<syn::LitStr>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let mut record_attr = RecordAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        if let Err(err) = record_attr.populate_from_ast(&ast.attrs) {
            errs.push(err);
        }

        for node in node.named.iter() {
            match Field::from_ast(node) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        let mut keyed = fields.iter().enumerate().filter(|(_, f)| f.key.is_some());
        let key = match (keyed.next(), keyed.next()) {
            (Some((index, _)), None) => Some(index),
            (Some(_), Some((_, second))) => {
                if let Some(attr) = &second.key {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "a record can have only one #[key] field",
                    ));
                }
                None
            }
            // Without an explicit `#[key]`, a field named `id` is the identity.
            _ => fields.iter().position(|field| field.name == "id"),
        };

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
            fields,
            key,
            table: record_attr.table,
        })
    }
}

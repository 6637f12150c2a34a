#[derive(Debug, Default)]
pub(crate) struct RecordAttr {
    /// Optional database table name to map the record to
    pub(crate) table: Option<syn::LitStr>,
}

impl RecordAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        for attr in attrs {
            if !attr.path().is_ident("table") {
                continue;
            }

            if self.table.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
            }

            let syn::Meta::NameValue(meta) = &attr.meta else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `table = \"table_name\"`",
                ));
            };

            let syn::Expr::Lit(lit) = &meta.value else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `table = \"table_name\"`",
                ));
            };

            let syn::Lit::Str(lit) = &lit.lit else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `table = \"table_name\"`",
                ));
            };

            self.table = Some(lit.clone());
        }

        Ok(())
    }
}

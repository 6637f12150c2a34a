use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_record_impl(&self) -> TokenStream {
        let tabula = &self.tabula;
        let ident = &self.record.ident;
        let name = ident.to_string();
        let table = match &self.record.table {
            Some(table) => quote!(Some(#table)),
            None => quote!(None),
        };
        let fields = self.expand_fields();
        let get_arms = self.expand_get_arms();
        let set_arms = self.expand_set_arms();

        quote! {
            impl #tabula::Record for #ident {
                const NAME: &'static str = #name;
                const TABLE: Option<&'static str> = #table;
                const FIELDS: &'static [#tabula::Field] = &[ #( #fields, )* ];

                fn get(&self, index: usize) -> #tabula::Value {
                    match index {
                        #( #get_arms, )*
                        _ => #tabula::Value::Null,
                    }
                }

                fn set(&mut self, index: usize, value: #tabula::Value) -> #tabula::Result<()> {
                    match index {
                        #( #set_arms, )*
                        _ => {
                            return Err(#tabula::Error::from_args(format_args!(
                                "field index {} out of range for `{}`",
                                index, #name
                            )));
                        }
                    }
                    Ok(())
                }
            }
        }
    }

    fn expand_fields(&self) -> Vec<TokenStream> {
        let tabula = &self.tabula;

        self.record
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let name = &field.name;
                let ty = &field.ty;
                let key = self.record.key == Some(index);

                quote! {
                    #tabula::Field {
                        name: #name,
                        ty: <#ty as #tabula::Primitive>::TYPE,
                        nullable: <#ty as #tabula::Primitive>::NULLABLE,
                        key: #key,
                    }
                }
            })
            .collect()
    }

    fn expand_get_arms(&self) -> Vec<TokenStream> {
        let tabula = &self.tabula;

        self.record
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let i = util::int(index);
                let field_ident = &field.ident;
                let ty = &field.ty;
                quote!(#i => <#ty as #tabula::Primitive>::to_value(&self.#field_ident))
            })
            .collect()
    }

    fn expand_set_arms(&self) -> Vec<TokenStream> {
        let tabula = &self.tabula;

        self.record
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let i = util::int(index);
                let field_ident = &field.ident;
                let ty = &field.ty;
                quote!(#i => self.#field_ident = <#ty as #tabula::Primitive>::load(value)?)
            })
            .collect()
    }
}

extern crate proc_macro;

use proc_macro::TokenStream;

/// Derives `tabula::Record` for a struct with named fields.
///
/// The identity field is the field marked `#[key]`, or else the field named
/// `id`. `#[table = "name"]` on the struct overrides the table name derived
/// from the type name.
#[proc_macro_derive(Record, attributes(key, table))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match tabula_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

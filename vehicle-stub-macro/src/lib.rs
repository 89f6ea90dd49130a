use proc_macro::TokenStream;

use quote::quote;
use syn::{ItemStruct, parse, parse_macro_input};
use syn::parse::Parser;

/// Appends `pub request_id: u64` to a struct with named fields.
///
/// Every record that crosses the transport boundary carries the id the stub allocated for it,
/// so results can be matched back to the request that produced them.
#[proc_macro_attribute]
pub fn add_request_id(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_struct = parse_macro_input!(input as ItemStruct);
    let _ = parse_macro_input!(args as parse::Nothing);

    if let syn::Fields::Named(ref mut fields) = item_struct.fields {
        match syn::Field::parse_named.parse2(quote! { pub request_id: u64 }) {
            Ok(field) => fields.named.push(field),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    return quote! {#item_struct}.into();
}

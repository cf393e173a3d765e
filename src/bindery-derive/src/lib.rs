mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::Result as SynResult;

/// Implements `Component` for the type of an `impl` block.
///
/// Exactly one associated function of the block must be annotated with
/// `#[inject]`; it becomes the constructor. Its arguments are resolved from
/// the container by type, or by name when annotated with `#[named("...")]`.
/// An `AnyInjectable` argument receives a handle to the container itself.
///
/// Without arguments the component is its own output. With
/// `#[component(OutputType, post_processor)]` the constructed value is passed
/// through `post_processor` to produce `OutputType`, e.g.
/// `#[component(Arc<dyn Trait>, Arc::new)]`.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    match component_impl(attr, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn component_impl(attr: TokenStream, item: TokenStream) -> SynResult<TokenStream2> {
    let attr_data = attrs::parse_attributes(attr)?;
    let expanded = impls::expand_implementation(item, attr_data)?;
    Ok(expanded)
}

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{quote, ToTokens};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::visit_mut::{self, VisitMut};
use syn::{
    AngleBracketedGenericArguments, Attribute, Error as SynError, FnArg, GenericArgument, Ident,
    ImplItem, ImplItemFn, ItemImpl, Meta, PathArguments, Result as SynResult, ReturnType,
    Signature, Type, TypePath,
};

use crate::attrs::AttributeData;

#[derive(Debug)]
struct ConstructorData {
    self_type: TypePath,
    identifier: Ident,
    arguments: Vec<ArgumentData>,
    return_type: ReturnTypeData,
}

#[derive(Debug)]
struct ArgumentData {
    span: Span,
    ty: Type,
    kind: ArgumentKind,
}

#[derive(Debug)]
enum ArgumentKind {
    Typed,
    Named(TokenStream2),
    Any,
}

#[derive(Debug)]
enum ReturnTypeData {
    Infallible,
    Result { error_type: TypePath },
}

const RETURN_TYPE_MESSAGE: &str = "a constructor's return type should be `Self` or `Result<Self, E>`";

struct AttributeRemovalVisitor;

impl AttributeRemovalVisitor {
    fn is_custom_attribute(attr: &Attribute) -> bool {
        match &attr.meta {
            Meta::Path(path) => path.is_ident("inject"),
            Meta::List(list) => list.path.is_ident("named"),
            Meta::NameValue(_) => false,
        }
    }
}

impl VisitMut for AttributeRemovalVisitor {
    fn visit_attributes_mut(&mut self, attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !Self::is_custom_attribute(attr));
        attrs
            .iter_mut()
            .for_each(|attr| visit_mut::visit_attribute_mut(self, attr));
    }
}

pub fn expand_implementation(
    impls: TokenStream,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let mut impls = match syn::parse::<ItemImpl>(impls) {
        Ok(impls) => impls,
        Err(err) => {
            return Err(SynError::new(
                err.span(),
                "`#[component]` should be annotated on the `impl` block",
            ))
        }
    };

    let self_type = get_self_type(&impls)?;
    let signature = get_constructor_signature(&impls.items, impls.span())?;
    let ctor_data = parse_constructor(self_type, signature)?;

    let expanded = expand_component_implementation(ctor_data, attr_data);

    let mut visitor = AttributeRemovalVisitor;
    visitor.visit_item_impl_mut(&mut impls);

    Ok(quote! {
        #impls
        #expanded
    })
}

fn get_self_type(impls: &ItemImpl) -> SynResult<TypePath> {
    if let Type::Path(ty) = impls.self_ty.as_ref() {
        Ok(ty.clone())
    } else {
        Err(SynError::new(impls.self_ty.span(), "invalid self type"))
    }
}

fn get_constructor_signature(items: &[ImplItem], impl_span: Span) -> SynResult<Signature> {
    let ctors: Vec<_> = items
        .iter()
        .filter_map(filter_and_map_item_fn)
        .filter(is_annotated_with_inject)
        .collect();

    let signature = if ctors.len() > 1 {
        return Err(SynError::new(
            impl_span,
            "only one associated function can be annotated with `#[inject]`",
        ));
    } else if let Some(&ctor) = ctors.first() {
        ctor.sig.clone()
    } else {
        return Err(SynError::new(
            impl_span,
            "no associated function is annotated with `#[inject]`",
        ));
    };

    if let Some(FnArg::Receiver(rec)) = signature.inputs.first() {
        return Err(SynError::new(
            rec.span(),
            "method is not allowed to be annotated with `#[inject]`",
        ));
    }

    Ok(signature)
}

fn filter_and_map_item_fn(item: &ImplItem) -> Option<&ImplItemFn> {
    if let ImplItem::Fn(impl_fn) = item {
        Some(impl_fn)
    } else {
        None
    }
}

fn is_annotated_with_inject(item_fn: &&ImplItemFn) -> bool {
    item_fn
        .attrs
        .iter()
        .any(|attr| matches!(&attr.meta, Meta::Path(path) if path.is_ident("inject")))
}

fn parse_constructor(self_type: TypePath, signature: Signature) -> SynResult<ConstructorData> {
    let identifier = signature.ident;
    let arguments = parse_constructor_arguments(signature.inputs)?;
    let return_type = parse_constructor_return_type(signature.output, &self_type)?;

    Ok(ConstructorData {
        self_type,
        identifier,
        arguments,
        return_type,
    })
}

fn parse_constructor_arguments(inputs: Punctuated<FnArg, Comma>) -> SynResult<Vec<ArgumentData>> {
    inputs
        .into_iter()
        .map(|arg| match arg {
            FnArg::Typed(arg) => {
                let span = arg.span();
                let ty = *arg.ty;
                let named = parse_argument_attributes(arg.attrs)?;
                let kind = match named {
                    Some(name) => ArgumentKind::Named(name),
                    None if is_any_injectable(&ty) => ArgumentKind::Any,
                    None => ArgumentKind::Typed,
                };
                Ok(ArgumentData { span, ty, kind })
            }
            FnArg::Receiver(rec) => Err(SynError::new(
                rec.span(),
                "a constructor should not have a receiver argument",
            )),
        })
        .collect()
}

fn is_any_injectable(ty: &Type) -> bool {
    if let Type::Path(path) = ty {
        path.path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "AnyInjectable")
    } else {
        false
    }
}

fn parse_argument_attributes(attrs: Vec<Attribute>) -> SynResult<Option<TokenStream2>> {
    let mut res = None;

    for attr in attrs {
        match attr.meta {
            Meta::List(list) if list.path.is_ident("named") => {
                if res.is_some() {
                    return Err(SynError::new(
                        list.span(),
                        "only one attribute of `#[named(...)]` is allowed",
                    ));
                }
                res = Some(list.tokens);
            }
            Meta::Path(path) if path.is_ident("named") => {
                return Err(SynError::new(
                    path.span(),
                    "expects `#[named(...)]` to receive a `&'static str`",
                ));
            }
            Meta::NameValue(nv) if nv.path.is_ident("named") => {
                return Err(SynError::new(
                    nv.span(),
                    "expects `#[named(...)]` to receive a `&'static str`",
                ));
            }
            _ => {}
        }
    }

    Ok(res)
}

fn parse_constructor_return_type(
    output: ReturnType,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let return_type = match output {
        ReturnType::Type(_, return_type) => *return_type,
        ReturnType::Default => return Err(SynError::new(Span::call_site(), RETURN_TYPE_MESSAGE)),
    };
    let return_type = match return_type {
        Type::Path(return_type) => return_type,
        other => return Err(SynError::new(other.span(), RETURN_TYPE_MESSAGE)),
    };

    let segments = &return_type.path.segments;
    let idents: Vec<_> = segments.iter().map(|s| s.ident.to_string()).collect();

    if &return_type == self_type || idents == ["Self"] {
        Ok(ReturnTypeData::Infallible)
    } else if idents == ["Result"] || idents == ["std", "result", "Result"] {
        let arguments = &segments.last().unwrap_or_else(|| unreachable!()).arguments;
        parse_result_return_type(arguments, self_type)
    } else {
        Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE))
    }
}

fn parse_result_return_type(
    type_args: &PathArguments,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let PathArguments::AngleBracketed(AngleBracketedGenericArguments {
        args: type_args, ..
    }) = type_args
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    };

    let mut args = type_args.iter();
    let (
        Some(GenericArgument::Type(Type::Path(first_type))),
        Some(GenericArgument::Type(Type::Path(error_type))),
        None,
    ) = (args.next(), args.next(), args.next())
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    };

    if first_type == self_type || first_type.path.is_ident("Self") {
        Ok(ReturnTypeData::Result {
            error_type: error_type.clone(),
        })
    } else {
        Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE))
    }
}

fn expand_component_implementation(
    ctor_data: ConstructorData,
    attr_data: AttributeData,
) -> TokenStream2 {
    let self_type = &ctor_data.self_type;
    let constructor = &ctor_data.identifier;

    let associated_type_output = if let AttributeData::Full { output_type, .. } = &attr_data {
        quote! { type Output = #output_type; }
    } else {
        quote! { type Output = #self_type; }
    };

    let associated_type_error =
        if let ReturnTypeData::Result { error_type } = &ctor_data.return_type {
            quote! { type Error = #error_type; }
        } else {
            quote! { type Error = std::convert::Infallible; }
        };

    let parameters = ctor_data
        .arguments
        .iter()
        .map(|arg| {
            let ty = &arg.ty;
            match &arg.kind {
                ArgumentKind::Typed => quote! { bindery::provider::Parameter::of::<#ty>(), },
                ArgumentKind::Named(name) => {
                    quote! { bindery::provider::Parameter::named::<#ty>(#name), }
                }
                ArgumentKind::Any => quote! { bindery::provider::Parameter::Any, },
            }
        })
        .collect::<TokenStream2>();

    let get_dep_statements = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = Ident::new(&format!("dep{i}"), arg.span);
            let ty = &arg.ty;
            match &arg.kind {
                ArgumentKind::Typed => quote! { let #dep = provider.get::<#ty>()?; },
                ArgumentKind::Named(name) => {
                    quote! { let #dep = provider.get_named::<#ty>(#name)?; }
                }
                ArgumentKind::Any => quote! { let #dep = provider.any(); },
            }
        })
        .collect::<TokenStream2>();

    let dep_args = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = Ident::new(&format!("dep{i}"), arg.span);
            quote! { #dep, }
        })
        .collect::<TokenStream2>();

    let wire_deps = if let ReturnTypeData::Infallible = &ctor_data.return_type {
        quote! { Ok(Ok(<#self_type>::#constructor(#dep_args))) }
    } else {
        quote! { Ok(<#self_type>::#constructor(#dep_args)) }
    };

    let post_process_body = if let AttributeData::Full { post_processor, .. } = &attr_data {
        quote! { #post_processor(self) }
    } else {
        quote! { self }
    };

    let self_tokens = self_type.to_token_stream();
    quote! {
        impl bindery::provider::component::Component for #self_tokens {
            #associated_type_output
            #associated_type_error

            fn parameters() -> std::vec::Vec<bindery::provider::Parameter> {
                std::vec![#parameters]
            }

            #[allow(unused_variables)]
            fn construct(
                provider: &bindery::provider::Provider<'_>,
            ) -> std::result::Result<
                std::result::Result<Self, Self::Error>,
                bindery::container::injector::InjectorError
            > {
                #get_dep_statements
                #wire_deps
            }

            fn post_process(self) -> Self::Output {
                #post_process_body
            }
        }
    }
}

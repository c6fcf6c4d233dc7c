use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Index, Member, Type, parse_macro_input};

pub fn derive_event(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    match expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(ast: &DeriveInput) -> syn::Result<TokenStream2> {
    // Get the struct name we are annotating
    let struct_name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &ast.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "Event can only be derived for structs",
            ));
        }
    };
    let member = cancellation_member(struct_name, fields)?;

    // Use ::rusty_emitter::Event which works both inside and outside the crate.
    // Inside the crate, this works because of `extern crate self as rusty_emitter;` in lib.rs
    // Outside the crate, this naturally resolves to the rusty_emitter dependency.
    Ok(quote! {
        impl #impl_generics ::rusty_emitter::Event for #struct_name #ty_generics #where_clause {
            fn cancellation(&self) -> &::rusty_emitter::Cancellation {
                &self.#member
            }

            fn cancellation_mut(&mut self) -> &mut ::rusty_emitter::Cancellation {
                &mut self.#member
            }
        }
    })
}

/// Locate the field holding the cancellation flag. An `#[event(cancellation)]` marker wins over
/// matching by type.
fn cancellation_member(struct_name: &syn::Ident, fields: &Fields) -> syn::Result<Member> {
    let indexed: Vec<(usize, &Field)> = fields.iter().enumerate().collect();

    let mut marked = Vec::new();
    for (index, field) in &indexed {
        if is_marked(field)? {
            marked.push((*index, *field));
        }
    }
    let candidates = if marked.is_empty() {
        indexed
            .into_iter()
            .filter(|(_, field)| is_cancellation_type(&field.ty))
            .collect()
    } else {
        marked
    };

    match candidates.as_slice() {
        [(index, field)] => Ok(member(*index, field)),
        [] => Err(syn::Error::new_spanned(
            struct_name,
            "Event derive requires a `Cancellation` field",
        )),
        [_, (_, second), ..] => Err(syn::Error::new_spanned(
            second,
            "multiple cancellation fields, mark one with #[event(cancellation)]",
        )),
    }
}

fn is_marked(field: &Field) -> syn::Result<bool> {
    let mut marked = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("cancellation") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("unsupported event attribute, expected `cancellation`"))
            }
        })?;
    }
    Ok(marked)
}

fn is_cancellation_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Cancellation"),
        _ => false,
    }
}

fn member(index: usize, field: &Field) -> Member {
    match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(index)),
    }
}

use std::rc::Rc;

use payloads::APIClient;
use yew::prelude::*;

use crate::{get_api_client, session};

/// The client shared by every hook below the root component.
#[derive(Clone)]
pub struct ApiClientContext(pub Rc<APIClient>);

impl PartialEq for ApiClientContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// The provided client, or one from `build` when there is none.
fn resolve_client(
    context: Option<&ApiClientContext>,
    build: impl FnOnce() -> APIClient,
) -> Rc<APIClient> {
    match context {
        Some(ApiClientContext(client)) => client.clone(),
        None => Rc::new(build()),
    }
}

/// The shared client, or one built for this component when rendered
/// outside the provider. Local storage is only read in the latter case.
#[hook]
pub fn use_api_client() -> Rc<APIClient> {
    let context = use_context::<ApiClientContext>();
    let client = use_memo(context, |context| {
        resolve_client(context.as_ref(), || {
            get_api_client(session::load_session())
        })
    });
    (*client).clone()
}

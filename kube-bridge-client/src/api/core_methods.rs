use std::{fmt::Debug, future::Future};

use either::Either;
use http::header::{HeaderValue, CONTENT_TYPE};
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    core::{object::ObjectList, response::Status, Request},
    Api, Error, Resource,
};
use kube_bridge_core::{Body, Callback};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::ApiClient;

/// Blocking verbs shared by the group sub-clients
///
/// Building the request can fail before anything is sent; that is returned.
/// Everything after that, transport and API errors included, goes to the callback.
impl ApiClient {
    pub(crate) fn create<K>(
        &self,
        verb: &'static str,
        namespace: Option<&str>,
        body: Body,
        callback: Callback<K, Error>,
    ) -> Result<(), Error>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let url = K::url_path(&(), namespace);
        let content_type = HeaderValue::from_static(body.content_type());
        let mut req = Request::new(url)
            .create(&PostParams::default(), body.into_bytes())
            .map_err(Error::BuildRequest)?;
        req.headers_mut().insert(CONTENT_TYPE, content_type);
        req.extensions_mut().insert(verb);
        self.dispatch(verb, callback, self.client.request::<K>(req));
        Ok(())
    }

    pub(crate) fn get<K>(&self, verb: &'static str, api: Api<K>, name: &str, callback: Callback<K, Error>)
    where
        K: Resource + Clone + DeserializeOwned + Debug,
    {
        self.dispatch(verb, callback, api.get(name));
    }

    pub(crate) fn list<K>(
        &self,
        verb: &'static str,
        api: Api<K>,
        lp: &ListParams,
        callback: Callback<ObjectList<K>, Error>,
    ) where
        K: Resource + Clone + DeserializeOwned + Debug,
    {
        self.dispatch(verb, callback, api.list(lp));
    }

    pub(crate) fn delete<K>(
        &self,
        verb: &'static str,
        api: Api<K>,
        name: &str,
        dp: &DeleteParams,
        callback: Callback<Either<K, Status>, Error>,
    ) where
        K: Resource + Clone + DeserializeOwned + Debug,
    {
        self.dispatch(verb, callback, api.delete(name, dp));
    }

    fn dispatch<T>(
        &self,
        verb: &'static str,
        callback: Callback<T, Error>,
        request: impl Future<Output = Result<T, Error>>,
    ) {
        trace!(verb, "dispatching blocking request");
        let result = self.runtime.block_on(request);
        trace!(verb, ok = result.is_ok(), "blocking request finished");
        if !callback.finish(result) {
            debug!(verb, "discarding result of a call that already timed out");
        }
    }
}

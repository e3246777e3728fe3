// HTTP-backed count source.

use std::future::Future;

use footfall_api::CountClient;

use crate::error::CoreError;
use crate::model::VisitorCount;
use crate::poller::CountSource;

impl CountSource for CountClient {
    fn fetch(&self) -> impl Future<Output = Result<VisitorCount, CoreError>> + Send {
        async move {
            let resp = self.fetch_count().await?;
            Ok(VisitorCount::new(resp.value))
        }
    }
}

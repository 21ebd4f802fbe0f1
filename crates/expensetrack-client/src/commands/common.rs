use std::path::Path;

use crate::ClientResult;
use crate::handle::StoreHandle;
use crate::store::TransactionStore;

pub(crate) fn open_handle(home_override: Option<&Path>) -> ClientResult<StoreHandle> {
    TransactionStore::open(home_override).map(StoreHandle::new)
}

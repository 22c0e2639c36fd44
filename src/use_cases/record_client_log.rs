use serde_json::Value;

use crate::domain::entities::ClientLogEntry;
use crate::domain::errors::ClientLogError;
use crate::domain::ports::{ClientLogSink, Clock};

// Client diagnostics use case: validate one entry and append it to the log of
// the current UTC day.
pub struct RecordClientLogUseCase<C, L> {
    pub clock: C,
    pub sink: L,
}

impl<C, L> RecordClientLogUseCase<C, L>
where
    C: Clock,
    L: ClientLogSink,
{
    pub async fn execute(&self, payload: Value) -> Result<(), ClientLogError> {
        let entry: ClientLogEntry = serde_json::from_value(payload)
            .map_err(|err| ClientLogError::InvalidEntry(err.to_string()))?;

        let day = self.clock.now().date_naive();
        self.sink.append(day, &entry).await
    }
}

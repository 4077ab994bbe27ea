//! Persistence seam for computed payoff vectors.

use std::collections::HashMap;
use std::sync::RwLock;

use pricer_core::types::PricingError;

use crate::mc::SimulationMethod;
use crate::path_dependent::{OptionType, PayoffVector};

/// Storage for payoff vectors, keyed by method and option.
///
/// The pricing engine writes every computed vector here, and estimates can
/// later be recomputed from the stored vectors alone. Implementations must be
/// shareable across the pricing worker threads.
pub trait PayoffStore: Send + Sync {
    /// Error raised by the backing storage.
    type Error: std::error::Error + Send + From<PricingError>;

    /// Persists `payoffs`, replacing any previous vector for the same key.
    fn store(
        &self,
        method: SimulationMethod,
        option: OptionType,
        payoffs: &PayoffVector,
    ) -> Result<(), Self::Error>;

    /// Loads the vector stored for the key, if any.
    fn load(
        &self,
        method: SimulationMethod,
        option: OptionType,
    ) -> Result<Option<PayoffVector>, Self::Error>;
}

/// Process-local payoff store.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationMethod;
/// use pricer_pricing::path_dependent::{OptionType, PayoffVector};
/// use pricer_pricing::pricing::{InMemoryPayoffStore, PayoffStore};
///
/// let store = InMemoryPayoffStore::new();
/// let payoffs = PayoffVector::dense(vec![1.0, 2.0]).unwrap();
/// store.store(SimulationMethod::Naive, OptionType::Vanilla, &payoffs).unwrap();
///
/// let loaded = store.load(SimulationMethod::Naive, OptionType::Vanilla).unwrap();
/// assert_eq!(loaded, Some(payoffs));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPayoffStore {
    entries: RwLock<HashMap<(SimulationMethod, OptionType), PayoffVector>>,
}

impl InMemoryPayoffStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> PricingError {
    PricingError::invalid("payoff_store", "lock poisoned by a panicking writer")
}

impl PayoffStore for InMemoryPayoffStore {
    type Error = PricingError;

    fn store(
        &self,
        method: SimulationMethod,
        option: OptionType,
        payoffs: &PayoffVector,
    ) -> Result<(), Self::Error> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert((method, option), payoffs.clone());
        Ok(())
    }

    fn load(
        &self,
        method: SimulationMethod,
        option: OptionType,
    ) -> Result<Option<PayoffVector>, Self::Error> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&(method, option)).cloned())
    }
}

//! Next-day price resolution
//!
//! Remote first, local GBM on any backend failure. Both stages are callable
//! on their own.

use crate::backend::{BackendError, PriceBackend};
use crate::model::{GbmModel, ModelError, PriceStep};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which stage produced a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Remote,
    Local,
}

/// A resolved step and where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub step: PriceStep,
    pub source: PriceSource,
}

/// Two-stage next-day price resolver
#[derive(Clone)]
pub struct PriceResolver {
    backend: Option<Arc<dyn PriceBackend>>,
    model: GbmModel,
}

impl PriceResolver {
    pub fn new(backend: Option<Arc<dyn PriceBackend>>, model: GbmModel) -> Self {
        Self { backend, model }
    }

    /// Resolver that never calls out
    pub fn local_only(model: GbmModel) -> Self {
        Self::new(None, model)
    }

    /// Remote stage only
    pub async fn resolve_remote(&self, current: Decimal) -> Result<PriceStep, BackendError> {
        let backend = self.backend.as_ref().ok_or(BackendError::Disabled)?;
        backend
            .simulate_next_day(current, &self.model.params())
            .await
    }

    /// Local stage only
    pub fn resolve_local<R: Rng + ?Sized>(
        &self,
        current: Decimal,
        rng: &mut R,
    ) -> Result<PriceStep, ModelError> {
        self.model.next_price(current, rng)
    }

    /// Remote if possible, otherwise local. Backend errors never escape.
    pub async fn resolve<R: Rng + ?Sized>(
        &self,
        current: Decimal,
        rng: &mut R,
    ) -> Result<Resolution, ModelError> {
        if self.backend.is_some() {
            match self.resolve_remote(current).await {
                Ok(step) => {
                    return Ok(Resolution {
                        step,
                        source: PriceSource::Remote,
                    })
                }
                Err(e) => {
                    tracing::warn!(error = %e, %current, "Remote simulation failed, using local model");
                }
            }
        }

        Ok(Resolution {
            step: self.resolve_local(current, rng)?,
            source: PriceSource::Local,
        })
    }
}

impl std::fmt::Debug for PriceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceResolver")
            .field("has_backend", &self.backend.is_some())
            .field("model", &self.model)
            .finish()
    }
}

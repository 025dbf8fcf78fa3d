//! The embedding-provider boundary.
//!
//! The engine never computes embeddings. It is handed vectors by an
//! external provider (a text or image model) and returns derived
//! structures. This module fixes that seam as a trait, with the actual
//! model call supplied by the user via an implementation or a closure,
//! keeping this crate free of any inference dependency.
//!
//! Providers may be slow (model inference, possibly remote). Batch
//! embedding exists so that a caller pays that latency once per batch
//! instead of once per item; [`Workbench`] routes every multi-item
//! operation through it.

use core::fmt;

use crate::cluster::{Kmeans, KmeansFit};
use crate::error::Result;
use crate::index::{NnIndex, SimilarityMatch};
use crate::project::Projector;
use crate::vecmath;

/// Produces fixed-length embedding vectors for items of type `T`.
///
/// All vectors from one provider instance share a dimensionality.
pub trait EmbeddingProvider<T> {
    /// Embed a single item.
    fn embed(&self, item: &T) -> Result<Vec<f32>>;

    /// Embed a batch, preserving input order.
    ///
    /// The default loops [`embed`](Self::embed); implementors backed by a
    /// real model should override it with one batched call.
    fn embed_batch(&self, items: &[&T]) -> Result<Vec<Vec<f32>>> {
        items.iter().map(|&item| self.embed(item)).collect()
    }
}

/// A function-based provider.
#[derive(Clone)]
pub struct FnProvider<F> {
    f: F,
}

impl<F> FnProvider<F> {
    /// Create a provider from a function.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, F> EmbeddingProvider<T> for FnProvider<F>
where
    F: Fn(&T) -> Result<Vec<f32>>,
{
    fn embed(&self, item: &T) -> Result<Vec<f32>> {
        (self.f)(item)
    }
}

/// Create a provider from a closure.
pub fn from_fn<T, F>(f: F) -> FnProvider<F>
where
    F: Fn(&T) -> Result<Vec<f32>>,
{
    FnProvider::new(f)
}

/// An embedding provider paired with the analysis engines.
///
/// Owns a provider and a growing [`NnIndex`] vocabulary; each operation
/// embeds its items in one batch and hands the vectors to the matching
/// engine. Workbenches are plain values: construct one per demo or
/// session, drop it when done. Nothing here is shared or global.
pub struct Workbench<P> {
    provider: P,
    index: NnIndex,
    projector: Projector,
}

impl<P> Workbench<P> {
    /// Create a workbench around a provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            index: NnIndex::new(),
            projector: Projector::new(),
        }
    }

    /// Replace the default projector (iteration count, seed).
    pub fn with_projector(mut self, projector: Projector) -> Self {
        self.projector = projector;
        self
    }

    /// Borrow the accumulated vocabulary.
    pub fn index(&self) -> &NnIndex {
        &self.index
    }

    /// Embed `items` in one batch and append them to the vocabulary,
    /// labeled by their display form.
    pub fn index_items<T>(&mut self, items: &[T]) -> Result<()>
    where
        T: fmt::Display,
        P: EmbeddingProvider<T>,
    {
        let refs: Vec<&T> = items.iter().collect();
        let vectors = self.provider.embed_batch(&refs)?;
        for (item, vector) in items.iter().zip(vectors) {
            self.index.add(item.to_string(), vector)?;
        }
        Ok(())
    }

    /// Embed one item and rank its k nearest vocabulary entries.
    pub fn query_item<T>(&self, item: &T, k: usize) -> Result<Vec<SimilarityMatch>>
    where
        P: EmbeddingProvider<T>,
    {
        let vector = self.provider.embed(item)?;
        self.index.query(&vector, k)
    }

    /// Embed two items, blend at fraction `t`, and rank the k nearest
    /// vocabulary entries to the blend.
    pub fn interpolate_items<T>(
        &self,
        a: &T,
        b: &T,
        t: f32,
        k: usize,
    ) -> Result<Vec<SimilarityMatch>>
    where
        P: EmbeddingProvider<T>,
    {
        let vectors = self.provider.embed_batch(&[a, b])?;
        let blend = vecmath::lerp(&vectors[0], &vectors[1], t)?;
        self.index.query(&blend, k)
    }

    /// Embed `items` in one batch and cluster them into k groups.
    pub fn cluster_items<T>(&self, items: &[T], k: usize) -> Result<KmeansFit>
    where
        P: EmbeddingProvider<T>,
    {
        let refs: Vec<&T> = items.iter().collect();
        let vectors = self.provider.embed_batch(&refs)?;
        Kmeans::new(k).fit(&vectors)
    }

    /// Embed `items` in one batch and project them to 2-D coordinates.
    pub fn project_items<T>(&self, items: &[T]) -> Result<Vec<[f32; 2]>>
    where
        P: EmbeddingProvider<T>,
    {
        let refs: Vec<&T> = items.iter().collect();
        let vectors = self.provider.embed_batch(&refs)?;
        self.projector.project(&vectors)
    }
}

//! Tensor kernels for influence scoring
//!
//! I_n = (F . R / |F||R|) * Centrality

/// Calculate cosine similarity between two vectors.
///
/// Single pass accumulating the dot product and both squared norms.
/// Returns 0.0 if either vector has zero norm; cosine similarity is
/// undefined there and callers rely on the clamp.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Influence score of a node relative to a firm embedding, weighted by
/// the node's centrality. Centrality passes through unchanged; a zero
/// or negative weight is the caller's call.
pub fn calculate_influence_tensor(
    firm_tensor: &[f32],
    node_tensor: &[f32],
    centrality: f32,
) -> f32 {
    let sim = cosine_similarity(firm_tensor, node_tensor);
    sim * centrality
}

/// Influence scores for a batch of node embeddings against one firm
/// embedding, in input order.
pub fn batch_influence(
    firm_tensor: &[f32],
    node_tensors: &[Vec<f32>],
    centralities: &[f32],
) -> Vec<f32> {
    node_tensors
        .iter()
        .zip(centralities.iter())
        .map(|(node, centrality)| calculate_influence_tensor(firm_tensor, node, *centrality))
        .collect()
}

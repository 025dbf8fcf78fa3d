use std::fmt;

use latent::provider::from_fn;
use latent::{silhouette, Interpolator, Kmeans, NnIndex, Projector, Workbench};

/// A demo item: a word with a pre-baked 2-D embedding. A real caller plugs
/// a text or image model in behind the same provider closure and everything
/// downstream is unchanged.
struct Word {
    name: &'static str,
    embedding: [f32; 2],
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn word(name: &'static str, x: f32, y: f32) -> Word {
    Word {
        name,
        embedding: [x, y],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimal end-to-end: provider -> index -> neighbors, blends, clusters,
    // 2-D layout.

    let provider = from_fn(|item: &Word| Ok(item.embedding.to_vec()));

    let cat = word("cat", 1.0, 0.0);
    let dog = word("dog", 0.0, 1.0);
    let animals = [
        word("cat", 1.0, 0.0),
        word("dog", 0.0, 1.0),
        word("kitten", 0.9, 0.1),
        word("puppy", 0.1, 0.9),
    ];

    let mut bench = Workbench::new(provider);
    bench.index_items(&animals)?;

    // Nearest neighbors of "cat".
    let neighbors = bench.query_item(&cat, 3)?;
    println!("neighbors of cat:");
    for m in &neighbors {
        println!("  {} (score {:.3})", m.label, m.score);
    }

    // Sweep the line from cat to dog and watch the nearest concept change.
    println!("cat -> dog sweep:");
    for step in 0..=4 {
        let t = step as f32 / 4.0;
        let nearest = bench.interpolate_items(&cat, &dog, t, 1)?;
        println!("  t={:.2}: {}", t, nearest[0].label);
    }

    // The engines also run standalone, without a workbench.
    let vectors: Vec<Vec<f32>> = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ];

    let fit = Kmeans::new(2).fit(&vectors)?;
    let labels = fit.labels();
    println!(
        "kmeans: labels={:?} iterations={} silhouette={:.3}",
        labels,
        fit.iterations,
        silhouette(&vectors, &labels)?
    );

    let points = Projector::new().project(&vectors)?;
    println!("2-D layout:");
    for (v, p) in vectors.iter().zip(&points) {
        println!("  {:?} -> ({:.2}, {:.2})", v, p[0], p[1]);
    }

    // Direct interpolation against a hand-built vocabulary.
    let mut vocabulary = NnIndex::new();
    vocabulary.add("north", vec![0.0, 1.0])?;
    vocabulary.add("east", vec![1.0, 0.0])?;
    vocabulary.add("northeast", vec![0.7, 0.7])?;

    let interp = Interpolator::new(&vocabulary);
    let mid = interp.interpolate(&[0.0, 1.0], &[1.0, 0.0], 0.5, 1)?;
    println!("between north and east: {}", mid[0].label);

    Ok(())
}

//! Glint Renderer - BVH-accelerated Whitted-style ray tracing.
//!
//! Scene elements are indexed by a bounding volume hierarchy and shaded with
//! the Phong model, shadow rays and recursive mirror reflection. Images are
//! rendered in parallel buckets.

mod bucket;
mod bvh;
mod element;
mod renderer;
mod sampler;
mod scene;
mod shape;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{Bvh, Hit};
pub use element::Element;
pub use renderer::{color_to_rgb, render, render_pixel, ImageBuffer, RenderConfig};
pub use sampler::Sampler;
pub use scene::{Scene, TraceSettings};
pub use shape::{Shape, SurfaceHit};
pub use sphere::Sphere;
pub use triangle::Triangle;

pub use glint_core::{Color, Light, Material};
/// Re-export common math types from glint_math
pub use glint_math::{Aabb, Camera, Interval, Ray, Transform, Vec3};

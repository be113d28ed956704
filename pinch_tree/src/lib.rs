//! # pinch_tree
//!
//! Hand-gesture driven generative scene: a pinch grows a procedural
//! Christmas tree, holding it wide explodes the tree into particles, and
//! the particles resolve into a rotating 3D cloud of photos with lyric
//! captions synchronized to the music.
//!
//! ## Phases
//!
//! | Phase | Enters on | Shows |
//! |---|---|---|
//! | `IDLE` | start, or hand lost | snow only |
//! | `TRACKING` | exactly one hand detected | hand constellation, tree sized by the pinch, hold ring |
//! | `EXPLOSION` | scale above 0.85 for 2 s without a dip | particle burst; music starts fading in |
//! | `GALLERY` | last burst particle dies | rotating photo cloud, star, lyric captions |
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Thumb–index distance | Tree scale (0.05 closed → 0.25 wide) |
//! | Hold wide | Charge the ring; full ring explodes the tree |
//! | Hand leaves (or a second hand appears) | Back to `IDLE` before the explosion |
//! | Hover / click a photo | Hand cursor / full-size viewer |
//!
//! ## Hand simulation
//!
//! The default landmark source is [`hand::SimHandSource`], driven from the
//! window's keyboard; any other detector plugs in through
//! [`hand::LandmarkSource`].
//!
//! | Key | Action |
//! |---|---|
//! | `H` | Show / hide the hand |
//! | `Up` / `Down` (hold) | Widen / narrow the pinch |
//! | `2` | Toggle a second hand |
//! | `Space` | Play / pause |
//! | `Left` / `Right` | Seek ∓5 s |
//! | `Escape` | Close the photo viewer |
//! | `Q` | Quit |

pub mod arena;
pub mod canvas;
pub mod phase;
pub mod burst;
pub mod ambient;
pub mod tree;
pub mod gallery;
pub mod overlay;
pub mod audio;
pub mod photos;
pub mod hand;
pub mod stage;
pub mod error;
pub mod visualizer;
pub mod app;

//! Non-player characters move between tiles of a single subsection along
//! routes calculated with A*.
//!
//! [A* search algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
//!
//! [Red Blob Games](https://www.redblobgames.com/pathfinding/a-star/introduction.html)
//!
//! Definitions:
//!
//! * Open list - nodes discovered but not yet expanded, kept ascending by `F`
//! * Closed list - nodes which have been expanded
//! * `G` - number of tiles walked from the start, the start itself counts as `1`
//! * `H` - Manhattan distance from a tile to the destination
//! * `F` - `G + H`, the estimated length of a route through a node
//!
//! A route is a list of tile indices which excludes the tile the search
//! started from and ends with the destination.
//!

pub mod path_node;
pub mod pathfinder;

//! The shape catalogue the tile supply is drawn from.
//!
//! Every free polyomino of two to six cells, topped up with hole-free
//! heptominoes to 96 definitions, so a nine-player supply never repeats a shape.

use crate::error::GameResult;
use crate::game::Shape;

/// Row masks for every supply shape, `#` marking an occupied cell.
pub const SHAPE_DEFINITIONS: &[&[&str]] = &[
    &["##"],
    &["###"],
    &["##", "#."],
    &["####"],
    &["###", "#.."],
    &["###", ".#."],
    &["##", "##"],
    &["##.", ".##"],
    &["#####"],
    &["####", "#..."],
    &["####", ".#.."],
    &["###", "##."],
    &["###", "#.#"],
    &["###", "#..", "#.."],
    &["###", ".#.", ".#."],
    &["###.", "..##"],
    &["##.", ".##", ".#."],
    &["##.", ".##", "..#"],
    &["##.", ".#.", ".##"],
    &[".#.", "###", ".#."],
    &["######"],
    &["#####", "#...."],
    &["#####", ".#..."],
    &["#####", "..#.."],
    &["####", "##.."],
    &["####", "#.#."],
    &["####", "#..#"],
    &["####", "#...", "#..."],
    &["####", ".##."],
    &["####", ".#..", ".#.."],
    &["####.", "...##"],
    &["###", "###"],
    &["###", "##.", "#.."],
    &["###", "##.", ".#."],
    &["###.", "#.##"],
    &["###", "#.#", "#.."],
    &["###.", ".###"],
    &["###", ".#.", "##."],
    &["#...", "####", "#..."],
    &["###..", "..###"],
    &["###.", "..##", "..#."],
    &["###.", "..##", "...#"],
    &["###.", "..#.", "..##"],
    &["##.", "###", ".#."],
    &["##.", "###", "..#"],
    &["##..", ".###", ".#.."],
    &["##..", ".###", "..#."],
    &["##..", ".###", "...#"],
    &["##.", ".##", "##."],
    &["#...", "####", ".#.."],
    &["##..", ".##.", "..##"],
    &["#...", "####", "..#."],
    &["#...", "####", "...#"],
    &[".#..", "####", ".#.."],
    &[".#..", "####", "..#."],
    &["#######"],
    &["######", "#....."],
    &["######", ".#...."],
    &["######", "..#..."],
    &["#####", "##..."],
    &["#####", "#.#.."],
    &["#####", "#..#."],
    &["#####", "#...#"],
    &["#####", "#....", "#...."],
    &["#####", ".##.."],
    &["#####", ".#.#."],
    &["#####", ".#...", ".#..."],
    &["#####", "..#..", "..#.."],
    &["#####.", "....##"],
    &["####", "###."],
    &["####", "##.#"],
    &["####", "##..", "#..."],
    &["####", "##..", ".#.."],
    &["####", "#.#.", "#..."],
    &["####", "#.#.", "..#."],
    &["####.", "#..##"],
    &["####", "#..#", "#..."],
    &["####", "#...", "##.."],
    &["####", "#...", "#...", "#..."],
    &["####", ".##.", ".#.."],
    &["####.", ".#.##"],
    &["####", ".#..", "##.."],
    &["####", ".#..", ".##."],
    &["####", ".#..", ".#..", ".#.."],
    &["####.", "..###"],
    &["####..", "...###"],
    &["####.", "...##", "...#."],
    &["####.", "...##", "....#"],
    &["####.", "...#.", "...##"],
    &["###.#", "..###"],
    &["###", "###", "#.."],
    &["###", "###", ".#."],
    &["###", "##.", ".##"],
    &["##..", "####", "#..."],
    &["###.", "#.##", "#..."],
    &["###.", "#.##", "..#."],
];

/// Parse the whole catalogue.
///
/// # Errors
///
/// Returns [`crate::GameError::InvalidShape`] if a definition is malformed.
pub fn catalog() -> GameResult<Vec<Shape>> {
    SHAPE_DEFINITIONS.iter().map(|rows| Shape::parse(rows)).collect()
}

// src/noyau/point.rs

use std::fmt;

use super::format::format_coordonnees;

/// Point (x, y) : valeur immuable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_coordonnees(self.x, self.y))
    }
}

/// Points marqués par l’utilisateur : ajout en fin, retrait du dernier.
///
/// Possédé par la couche présentation ; les points viennent de
/// `Gestionnaire::point_en`.
#[derive(Clone, Debug, Default)]
pub struct PointsMarques {
    points: Vec<Point>,
}

impl PointsMarques {
    pub fn ajouter(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Sans effet si la liste est vide.
    pub fn retirer_dernier(&mut self) -> Option<Point> {
        self.points.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

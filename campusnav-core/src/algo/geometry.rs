use geo::{Coord, Distance, Euclidean, Point};

/// Ray-casting parity test of `point` against a vertex ring.
///
/// The ring does not need an explicit closing vertex. Crossings are counted
/// with the half-open rule `(yi > y) != (yj > y)`, so a ray passing exactly
/// through a vertex is counted once. Rings with fewer than three vertices
/// contain nothing.
pub fn point_in_polygon(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let Coord { x, y } = point;
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let Coord { x: xi, y: yi } = ring[i];
        let Coord { x: xj, y: yj } = ring[j];

        // (yi > y) != (yj > y) guarantees yj != yi, the division is safe
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Euclidean distance in the plane of the caller's coordinates
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

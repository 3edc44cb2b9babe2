//! Room and corridor dungeon generator
//!
//! Classic roguelike dungeon with rectangular rooms connected by corridors.

use rand::Rng;

use crate::entities::Position;
use crate::world::tile::FLOOR;
use crate::world::Map;

const MIN_ROOM_SIZE: i32 = 4;
const MAX_ROOM_SIZE: i32 = 8;
const MAX_ROOMS: usize = 18;
const PLACEMENT_TRIES: usize = 100;

/// A rectangular room
#[derive(Debug, Clone)]
struct Room {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl Room {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Generate a walled dungeon of rooms joined by corridors.
///
/// Returns the map and the centre of the first room. Maps too small to fit
/// a room come back as a single open chamber.
pub fn generate_dungeon(width: i32, height: i32, rng: &mut impl Rng) -> (Map, Position) {
    let mut map = Map::new(width, height);

    if width < MIN_ROOM_SIZE + 3 || height < MIN_ROOM_SIZE + 3 {
        let room = Room::new(0, 0, width - 1, height - 1);
        carve_room(&mut map, &room);
        return (map, room.center());
    }

    let max_w = MAX_ROOM_SIZE.min(width - 3);
    let max_h = MAX_ROOM_SIZE.min(height - 3);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..PLACEMENT_TRIES {
        if rooms.len() >= MAX_ROOMS {
            break;
        }

        let w = rng.gen_range(MIN_ROOM_SIZE..=max_w);
        let h = rng.gen_range(MIN_ROOM_SIZE..=max_h);
        let x = rng.gen_range(0..width - w - 1);
        let y = rng.gen_range(0..height - h - 1);

        let new_room = Room::new(x, y, w, h);
        if rooms.iter().any(|r| new_room.intersects(r)) {
            continue;
        }

        carve_room(&mut map, &new_room);

        if let Some(prev) = rooms.last() {
            let prev_center = prev.center();
            let new_center = new_room.center();

            if rng.gen_bool(0.5) {
                carve_h_corridor(&mut map, prev_center.x, new_center.x, prev_center.y);
                carve_v_corridor(&mut map, prev_center.y, new_center.y, new_center.x);
            } else {
                carve_v_corridor(&mut map, prev_center.y, new_center.y, prev_center.x);
                carve_h_corridor(&mut map, prev_center.x, new_center.x, new_center.y);
            }
        }

        rooms.push(new_room);
    }

    let start = match rooms.first() {
        Some(first) => first.center(),
        None => {
            // Every try overlapped; fall back to one central room
            let room = Room::new(0, 0, width - 1, height - 1);
            carve_room(&mut map, &room);
            room.center()
        }
    };

    log::debug!("Generated {}x{} dungeon with {} rooms", width, height, rooms.len());
    (map, start)
}

/// Carve out a room, leaving its outer ring as wall
fn carve_room(map: &mut Map, room: &Room) {
    for y in room.y1 + 1..room.y2 {
        for x in room.x1 + 1..room.x2 {
            map.set(x, y, FLOOR);
        }
    }
}

fn carve_h_corridor(map: &mut Map, x1: i32, x2: i32, y: i32) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    for x in start..=end {
        map.set(x, y, FLOOR);
    }
}

fn carve_v_corridor(map: &mut Map, y1: i32, y2: i32, x: i32) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    for y in start..=end {
        map.set(x, y, FLOOR);
    }
}

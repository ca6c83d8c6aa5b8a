use crate::board::{Direction, Side};

/// key codes are the uppercase ascii value of the key's character.
pub const LEFT_RACKET_UP: i32 = b'W' as i32;
pub const LEFT_RACKET_DOWN: i32 = b'S' as i32;
pub const RIGHT_RACKET_UP: i32 = b'O' as i32;
pub const RIGHT_RACKET_DOWN: i32 = b'K' as i32;

/// `None` for keys that aren't bound to a racket.
pub fn map_key_to_action(key_code: i32) -> Option<(Side, Direction)> {
    match key_code {
        LEFT_RACKET_UP => Some((Side::Left, Direction::Up)),
        LEFT_RACKET_DOWN => Some((Side::Left, Direction::Down)),
        RIGHT_RACKET_UP => Some((Side::Right, Direction::Up)),
        RIGHT_RACKET_DOWN => Some((Side::Right, Direction::Down)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys() {
        assert_eq!(map_key_to_action(87), Some((Side::Left, Direction::Up)));
        assert_eq!(map_key_to_action(83), Some((Side::Left, Direction::Down)));
        assert_eq!(map_key_to_action(79), Some((Side::Right, Direction::Up)));
        assert_eq!(map_key_to_action(75), Some((Side::Right, Direction::Down)));
    }

    #[test]
    fn unbound_keys() {
        // lowercase letters have their own codes and aren't bound.
        for key_code in [0, 32, b'w' as i32, b'k' as i32, b'A' as i32, -1, 1000] {
            assert_eq!(map_key_to_action(key_code), None, "key code {key_code}");
        }
    }
}

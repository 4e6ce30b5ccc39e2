use std::fmt;
use std::str::FromStr;

use lrtouch_catalog::Atom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trial::Trial;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A single touch on the trial surface.
///
/// `Outside` is any touch that missed both choice regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Left,
    Right,
    Outside,
}

impl Response {
    pub fn side(&self) -> Option<Side> {
        match self {
            Response::Left => Some(Side::Left),
            Response::Right => Some(Side::Right),
            Response::Outside => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Response::Left => "left",
            Response::Right => "right",
            Response::Outside => "outside",
        }
    }
}

impl From<Side> for Response {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Response::Left,
            Side::Right => Response::Right,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised response {0:?} (expected left, right or outside)")]
pub struct ParseResponseError(pub String);

impl FromStr for Response {
    type Err = ParseResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Response::Left),
            "r" | "right" => Ok(Response::Right),
            "o" | "outside" => Ok(Response::Outside),
            other => Err(ParseResponseError(other.to_string())),
        }
    }
}

/// Left/right placement of a trial's two images for one presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub left: Atom,
    pub right: Atom,
    pub correct_side: Side,
}

impl Layout {
    /// Place the target on the left when `target_left` is set, otherwise on the right.
    pub fn arrange(trial: &Trial, target_left: bool) -> Self {
        if target_left {
            Self {
                left: trial.target.clone(),
                right: trial.distractor.clone(),
                correct_side: Side::Left,
            }
        } else {
            Self {
                left: trial.distractor.clone(),
                right: trial.target.clone(),
                correct_side: Side::Right,
            }
        }
    }

    pub fn image_on(&self, side: Side) -> &Atom {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// `Outside` never matches, whatever the correct side is.
    pub fn is_correct(&self, response: Response) -> bool {
        response.side() == Some(self.correct_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrtouch_catalog::ImageCatalog;

    fn cat_dog() -> Trial {
        let mut catalog = ImageCatalog::default();
        Trial::new("cat", "dog", &mut catalog).unwrap()
    }

    #[test]
    fn arrange_places_target_on_requested_side() {
        let trial = cat_dog();

        let left = Layout::arrange(&trial, true);
        assert_eq!(&*left.left, "cat");
        assert_eq!(&*left.right, "dog");
        assert_eq!(left.correct_side, Side::Left);

        let right = Layout::arrange(&trial, false);
        assert_eq!(&*right.left, "dog");
        assert_eq!(&*right.right, "cat");
        assert_eq!(right.correct_side, Side::Right);
        assert_eq!(right.image_on(right.correct_side), &trial.target);
    }

    #[test]
    fn outside_is_never_correct() {
        let trial = cat_dog();
        for target_left in [true, false] {
            let layout = Layout::arrange(&trial, target_left);
            assert!(!layout.is_correct(Response::Outside));
            assert!(layout.is_correct(layout.correct_side.into()));
        }
    }

    #[test]
    fn parse_responses() {
        assert_eq!("L".parse::<Response>(), Ok(Response::Left));
        assert_eq!(" right ".parse::<Response>(), Ok(Response::Right));
        assert_eq!("outside".parse::<Response>(), Ok(Response::Outside));
        assert!("up".parse::<Response>().is_err());
        assert_eq!(Response::Outside.to_string(), "outside");
    }
}

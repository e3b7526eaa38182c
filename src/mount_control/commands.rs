use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

use crate::coordinate::GeoCoordinate;
use crate::util::*;

/// Number of commands in the setup handshake
pub const SETUP_STEPS: usize = 5;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SetupStep {
    SiteLatitude,
    SiteLongitude,
    LocalDate,
    LocalTime,
    Start,
}

impl SetupStep {
    /// 1-based position in the handshake
    pub fn index(&self) -> usize {
        match self {
            SetupStep::SiteLatitude => 1,
            SetupStep::SiteLongitude => 2,
            SetupStep::LocalDate => 3,
            SetupStep::LocalTime => 4,
            SetupStep::Start => 5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SetupStep::SiteLatitude => "set site latitude",
            SetupStep::SiteLongitude => "set site longitude",
            SetupStep::LocalDate => "set local date",
            SetupStep::LocalTime => "set local time",
            SetupStep::Start => "start tracking",
        }
    }
}

/// What the mount sends back when it accepts a command
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Acknowledgement {
    /// A lone `1`
    Accepted,
    /// `1` followed by this many `#`-terminated strings
    AcceptedWithMessages(usize),
}

impl Acknowledgement {
    pub const ACCEPTED: u8 = b'1';
    pub const REJECTED: u8 = b'0';
    pub const TERMINATOR: u8 = b'#';
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct SetupCommand {
    step: SetupStep,
    payload: String,
    ack: Acknowledgement,
}

impl SetupCommand {
    fn new(step: SetupStep, payload: String, ack: Acknowledgement) -> Self {
        SetupCommand { step, payload, ack }
    }

    /// The handshake, in transmission order.
    /// `longitude` is positive East and is converted to `convention` here.
    pub fn sequence(
        latitude: &GeoCoordinate,
        longitude: &GeoCoordinate,
        when: NaiveDateTime,
        convention: LongitudeConvention,
    ) -> SetupResult<[SetupCommand; SETUP_STEPS]> {
        check_axis(latitude, Axis::Latitude)?;
        check_axis(longitude, Axis::Longitude)?;

        let longitude = convention.apply(*longitude);

        Ok([
            Self::new(
                SetupStep::SiteLatitude,
                format!(":St{}#", latitude.encode()),
                Acknowledgement::Accepted,
            ),
            Self::new(
                SetupStep::SiteLongitude,
                format!(":Sg{}#", longitude.encode()),
                Acknowledgement::Accepted,
            ),
            // Meade firmware answers with "Updating Planetary Data#" and a blank line
            Self::new(
                SetupStep::LocalDate,
                when.format(":SC%m/%d/%y#").to_string(),
                Acknowledgement::AcceptedWithMessages(2),
            ),
            Self::new(
                SetupStep::LocalTime,
                when.format(":SL%H:%M:%S#").to_string(),
                Acknowledgement::Accepted,
            ),
            Self::new(
                SetupStep::Start,
                ":hU#".to_string(),
                Acknowledgement::Accepted,
            ),
        ])
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.payload.as_bytes()
    }

    pub fn ack(&self) -> Acknowledgement {
        self.ack
    }
}

impl Display for SetupCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}: {}", self.step.index(), self.step.description(), self.payload)
    }
}

fn check_axis(coordinate: &GeoCoordinate, axis: Axis) -> SetupResult<()> {
    if coordinate.axis() == axis {
        Ok(())
    } else {
        Err(SetupError::WrongAxis {
            expected: axis,
            found: coordinate.axis(),
            text: coordinate.encode(),
        })
    }
}

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum VehicleProfile {
    #[default]
    Car,
    Bicycle,
    Van,
}

impl VehicleProfile {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Car => "driving-car",
            Self::Bicycle => "cycling-regular",
            Self::Van => "driving-hgv",
        }
    }

    pub fn rate_per_km(&self) -> f64 {
        match self {
            Self::Car => 15.0,
            Self::Bicycle => 10.0,
            Self::Van => 20.0,
        }
    }

    pub fn minutes_per_km(&self) -> f64 {
        match self {
            Self::Car => 2.0,
            Self::Bicycle => 4.0,
            Self::Van => 2.5,
        }
    }
}

impl From<&str> for VehicleProfile {
    fn from(name: &str) -> Self {
        match name {
            "driving-car" => Self::Car,
            "cycling-regular" => Self::Bicycle,
            "driving-hgv" => Self::Van,
            other => {
                tracing::warn!("unknown vehicle profile {:?}, using driving-car", other);
                Self::Car
            }
        }
    }
}

impl From<String> for VehicleProfile {
    fn from(name: String) -> Self {
        name.as_str().into()
    }
}

impl From<VehicleProfile> for &'static str {
    fn from(profile: VehicleProfile) -> Self {
        profile.name()
    }
}

#[test]
fn unknown_names_fall_back_to_car() {
    assert_eq!(VehicleProfile::from("driving-hgv"), VehicleProfile::Van);
    assert_eq!(VehicleProfile::from("cycling-regular"), VehicleProfile::Bicycle);
    assert_eq!(VehicleProfile::from("hovercraft"), VehicleProfile::Car);
    assert_eq!(VehicleProfile::from(""), VehicleProfile::Car);
}

#[test]
fn serializes_as_routing_profile_name() {
    let json = serde_json::to_string(&VehicleProfile::Bicycle).unwrap();
    assert_eq!(json, r#""cycling-regular""#);

    let profile: VehicleProfile = serde_json::from_str(r#""driving-hgv""#).unwrap();
    assert_eq!(profile, VehicleProfile::Van);
}

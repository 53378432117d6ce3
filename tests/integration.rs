use qtty::Seconds;
use sartime::{
    CivilDateTime, JsdDateTime, JulianDate, Keywordlist, KeywordStore, MjdDateTime, SarError,
    SensorParams, SiderealEpoch, SightDirection, EARTH_ROTATION_RATE,
};
use std::collections::HashMap;
use std::f64::consts::TAU;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn civil_julian_civil_roundtrip_1950_2050() {
    // Ten-day stride with a varying time of day.
    let start = CivilDateTime::new(1950, 1, 1, 0, 0.0).unwrap().to_julian_date();
    for step in 0..3_653 {
        let second = (step * 7_919) % 86_400;
        let jd = JulianDate::new(start.value() + step as f64 * 10.0);
        let civil = CivilDateTime::from_julian_date(jd).unwrap();
        let shifted = CivilDateTime::new(
            civil.year(),
            civil.month(),
            civil.day(),
            second as u32,
            0.25,
        )
        .unwrap();
        let back = CivilDateTime::from_julian_date(shifted.to_julian_date()).unwrap();
        let drift = (back.to_julian_date() - shifted.to_julian_date()).value();
        assert!(drift.abs() < 1e-6, "{shifted}: {drift} d");
        assert_eq!(
            (back.year(), back.month(), back.day()),
            (shifted.year(), shifted.month(), shifted.day())
        );
    }
}

#[test]
fn reference_julian_dates() {
    let midnight: CivilDateTime = "2000-01-01T00:00:00Z".parse().unwrap();
    assert_eq!(midnight.to_julian_date().value(), 2_451_544.5);
    let noon: CivilDateTime = "2000-01-01T12:00:00".parse().unwrap();
    assert_eq!(noon.to_julian_date(), JulianDate::J2000);
}

#[test]
fn normalization_contract() {
    let raw = JsdDateTime::new(JulianDate::new(2_451_545.0), 90_000.0, 0.0);
    let norm = raw.normalized();
    assert_eq!(norm.day0h_tu(), JulianDate::new(2_451_545.5));
    assert_eq!(norm.second(), 46_800.0);
    assert_eq!(norm.decimal(), 0.0);
    assert_eq!(norm, JsdDateTime::new(JulianDate::new(2_451_546.0), 3_600.0, 0.0));

    let again = norm.normalized();
    assert_eq!(
        (again.day0h_tu(), again.second(), again.decimal()),
        (norm.day0h_tu(), norm.second(), norm.decimal())
    );

    let mut in_place = raw;
    in_place.normalize();
    assert_eq!(in_place.second(), 46_800.0);
}

#[test]
fn gmst_advances_at_sidereal_rate_and_wraps() {
    let start = JsdDateTime::new(JulianDate::new(2_455_197.5), 0.0, 0.0);
    let mut previous = start.to_gmst(SiderealEpoch::An2000).tms();
    let step = 600.0;
    for i in 1..=300 {
        let tms = start.add_seconds(i as f64 * step).to_gmst(SiderealEpoch::An2000).tms();
        assert!((0.0..TAU).contains(&tms));
        let advance = (tms - previous).rem_euclid(TAU);
        assert!(
            (advance - step * EARTH_ROTATION_RATE).abs() < 1e-6,
            "step {i}: {advance}"
        );
        previous = tms;
    }
}

#[test]
fn sidereal_epochs_agree_1960_2040() {
    let mut civil_year = 1960;
    while civil_year <= 2040 {
        for (month, second) in [(1, 0), (4, 20_000), (8, 43_200), (11, 80_000)] {
            let civil = CivilDateTime::new(civil_year, month, 15, second, 0.0).unwrap();
            let a = civil.to_gmst(SiderealEpoch::An1900).tms();
            let b = civil.to_gmst(SiderealEpoch::An1950).tms();
            let c = civil.to_gmst(SiderealEpoch::An2000).tms();
            for (x, y) in [(a, b), (b, c), (a, c)] {
                let gap = (x - y).abs();
                let gap = gap.min(TAU - gap);
                assert!(gap < 2e-5, "{civil}: {gap} rad");
            }
        }
        civil_year += 4;
    }
}

#[test]
fn split_date_survives_long_offsets() {
    let t0: JsdDateTime = "2010-01-01T00:00:00Z"
        .parse::<CivilDateTime>()
        .unwrap()
        .into();
    let t1 = t0 + Seconds::new(10.0 * 86_400.0 + 1e-7);
    let dt = t1 - t0;
    assert!((dt.value() - (864_000.0 + 1e-7)).abs() < 1e-9);
}

#[test]
fn envisat_stamp_to_civil() {
    let civil = JsdDateTime::from(MjdDateTime::new(3_718, 36_000, 500_000))
        .to_civil()
        .unwrap();
    assert_eq!(civil.to_string(), "2010-03-07T10:00:00.500000Z");
}

#[test]
fn parse_errors_carry_codes() {
    init_logging();
    let err = "07/03/2008 05:45".parse::<CivilDateTime>().unwrap_err();
    assert_eq!(err.code(), 1);
    let err = CivilDateTime::parse_utc("2008-02-30T00:00:00").unwrap_err();
    assert_eq!(err.code(), 2);
}

#[test]
fn sensor_state_roundtrips_through_any_store() {
    init_logging();
    let mut params = SensorParams::new();
    params.set_prf(2_067.120_103_315_4).unwrap();
    params.set_sf(18_962_468.0).unwrap();
    params.set_rwl(0.055_465_760_9).unwrap();
    params.set_col_direction(-1).unwrap();
    params.set_lin_direction(1).unwrap();
    params.set_sight_direction(SightDirection::Left);
    params.set_n_azimuth_look(1.0).unwrap();
    params.set_n_range_look(2.0).unwrap();
    params.set_dopcen(101.5).unwrap();
    params.set_dopcen_linear(-0.002).unwrap();

    let mut kwl = Keywordlist::new();
    params.save_state(&mut kwl, Some("product.")).unwrap();
    let mut from_list = SensorParams::new();
    from_list.load_state(&kwl, Some("product.")).unwrap();
    assert_eq!(from_list, params);

    let mut map: HashMap<String, String> = HashMap::new();
    params.save_state(&mut map, None).unwrap();
    assert_eq!(map.find("sensor_params.sight_direction"), Some("0"));
    let mut from_map = SensorParams::new();
    from_map.load_state(&map, None).unwrap();
    assert_eq!(from_map, params);

    let err = SensorParams::new().load_state(&kwl, None).unwrap_err();
    assert!(matches!(err, SarError::MissingKeyword { .. }));
    assert_eq!(err.code(), 3);
}

#[cfg(feature = "serde")]
#[test]
fn serde_rejects_invalid_calendar_fields() {
    let civil = CivilDateTime::new(2004, 2, 29, 100, 0.5).unwrap();
    let json = serde_json::to_string(&civil).unwrap();
    let back: CivilDateTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, civil);

    let bad = r#"{"year":2003,"month":2,"day":29,"second":0,"decimal":0.0}"#;
    assert!(serde_json::from_str::<CivilDateTime>(bad).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn serde_sensor_params_checks_directions() {
    let params = SensorParams::new();
    let json = serde_json::to_string(&params).unwrap();
    let back: SensorParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);

    let bad = json.replace("\"col_direction\":1", "\"col_direction\":0");
    assert!(serde_json::from_str::<SensorParams>(&bad).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn serde_julian_date_is_a_bare_number() {
    let json = serde_json::to_string(&JulianDate::J2000).unwrap();
    assert_eq!(json, "2451545.0");
}

#[cfg(feature = "serde")]
#[test]
fn serde_gmst_wraps_angle_into_range() {
    use sartime::GmstDateTime;

    let gmst: GmstDateTime =
        serde_json::from_str(r#"{"tms":-7.5,"origin":"An2000"}"#).unwrap();
    assert!((0.0..TAU).contains(&gmst.tms()));
    assert!((gmst.tms() - (-7.5f64).rem_euclid(TAU)).abs() < 1e-12);
    assert_eq!(gmst.origin(), SiderealEpoch::An2000);

    let computed = JsdDateTime::new(JulianDate::new(2_455_197.5), 3_600.0, 0.25)
        .to_gmst(SiderealEpoch::An1950);
    let json = serde_json::to_string(&computed).unwrap();
    let back: GmstDateTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, computed);
}

use chrono::Utc;
use sartime::{
    CivilDateTime, JsdDateTime, Keywordlist, Mjd2000Date, SarResult, SensorParams, SiderealEpoch,
};

fn main() -> SarResult<()> {
    let first_line: CivilDateTime = "2008-03-07T05:45:46.123456Z".parse()?;
    let jd = first_line.to_julian_date();
    let jsd = first_line.to_jsd();

    println!("UTC:   {first_line}");
    println!("JD:    {jd}");
    println!("MJD2000: {}", jd.to::<sartime::MJD2000>());
    println!("Split: {jsd}");
    for epoch in [
        SiderealEpoch::An1900,
        SiderealEpoch::An1950,
        SiderealEpoch::An2000,
    ] {
        println!("{}", jsd.to_gmst(epoch));
    }

    let mut sensor = SensorParams::new();
    sensor.set_prf(1_652.415_691_672_28)?;
    sensor.set_sf(19_207_680.0)?;
    sensor.set_rwl(0.056_235_656_8)?;
    sensor.set_n_azimuth_look(4.0)?;
    let line_1000 = sensor.azimuth_time(jsd, 1_000.0, 0.0)?;
    println!("Line 1000 acquired at {}", line_1000.to_civil()?);

    let mut kwl = Keywordlist::new();
    sensor.save_state(&mut kwl, Some("image."))?;
    print!("{kwl}");

    let now = CivilDateTime::from_utc(Utc::now())?;
    let now_mjd2000 = Mjd2000Date::from_utc(Utc::now());
    println!("Now: {now} ({now_mjd2000})");
    println!("Now, split: {}", JsdDateTime::from(now));
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::prelude::*;
    use crate::tests::toolkit::{config, epoch, parse_resource};
    use std::io::Cursor;
    use std::str::FromStr;

    #[test]
    fn interleaved_log() {
        let log = parse_resource("interleaved.log", &config());
        assert!(log.diagnostics.is_empty(), "{}", log.diagnostics);

        let table = &log.table;
        assert_eq!(table.len(), 6);
        assert_eq!(table.count(Kind::ErrorStats), 5);
        assert_eq!(table.count(Kind::PositionFix), 5);

        let row = table.get(&epoch(12, 35, 19)).unwrap();
        assert!(row.is_complete());

        let stats = row.error_stats.as_ref().unwrap();
        assert_eq!(stats.talker, Talker::GPS);
        assert_eq!(stats.rms, Some(1.2));
        assert_eq!(stats.sigma_major, Some(0.8));
        assert_eq!(stats.sigma_minor, Some(0.6));
        assert_eq!(stats.orientation, Some(45.0));
        assert_eq!(stats.sigma_lat, Some(0.5));
        assert_eq!(stats.sigma_lon, Some(0.5));
        assert_eq!(stats.sigma_alt, Some(0.7));

        let fix = row.position_fix.as_ref().unwrap();
        assert_eq!(fix.quality, Some(FixQuality::Fix));
        assert_eq!(fix.num_sats, Some(8));
        assert_eq!(fix.hdop, Some(0.9));
        assert_eq!(fix.dgps_age, None);
        assert_eq!(fix.dgps_station, None);
        assert!((fix.latitude_ddeg.unwrap() - 48.1173).abs() < 1.0E-4);
        assert!((fix.longitude_ddeg.unwrap() - 11.5167).abs() < 1.0E-4);

        // GST only
        let row = table.get(&epoch(12, 35, 21)).unwrap();
        assert!(row.error_stats.is_some());
        assert!(row.position_fix.is_none());

        // GGA only
        let row = table.get(&epoch(12, 35, 22)).unwrap();
        assert!(row.error_stats.is_none());
        assert!(row.position_fix.is_some());

        // differential fix
        let fix = table
            .get(&epoch(12, 35, 23))
            .and_then(|row| row.position_fix.as_ref())
            .unwrap();
        assert_eq!(fix.quality, Some(FixQuality::DifferentialFix));
        assert_eq!(fix.dgps_age, Some(2.0));
        assert_eq!(fix.dgps_station, Some(31));

        assert_eq!(table.dgps_age().count(), 1);
        assert_eq!(table.num_sats().count(), 5);
        assert_eq!(table.rms_positions().count(), 4);
    }

    #[test]
    fn checksum_validation_on_valid_log() {
        let cfg = config().with_checksum_validation(true);
        let log = parse_resource("interleaved.log", &cfg);
        assert!(log.diagnostics.is_empty(), "{}", log.diagnostics);
        assert_eq!(log.table.len(), 6);
    }

    #[test]
    fn corrupted_log() {
        let log = parse_resource("corrupted.log", &config());
        let diag = &log.diagnostics;

        assert_eq!(diag.count(IssueKind::MalformedLine), 1);
        assert_eq!(diag.count(IssueKind::FieldCountMismatch), 1);
        assert_eq!(diag.count(IssueKind::BadTimeField), 1);
        assert_eq!(diag.count(IssueKind::BadNumericField), 1);
        assert_eq!(diag.count(IssueKind::UnknownEnumValue), 1);
        assert_eq!(diag.count(IssueKind::DuplicateTimestamp), 1);
        assert_eq!(diag.count(IssueKind::ChecksumMismatch), 0);
        assert_eq!(diag.total(), 6);
        assert_eq!(diag.warnings().count(), 1);

        let lines = diag.errors().map(|d| d.line).collect::<Vec<_>>();
        assert_eq!(lines, vec![3, 4, 5, 6, 7]);

        let table = &log.table;
        assert_eq!(table.len(), 4);

        // bad RMS field nulled, the rest retained
        let row = table.get(&epoch(10, 0, 1)).unwrap();
        let stats = row.error_stats.as_ref().unwrap();
        assert_eq!(stats.rms, None);
        assert_eq!(stats.sigma_major, Some(0.8));

        // last duplicate wins
        let fix = row.position_fix.as_ref().unwrap();
        assert_eq!(fix.num_sats, Some(9));
        assert_eq!(fix.quality, Some(FixQuality::Fix));

        // checksum is not verified by default
        assert!(table.get(&epoch(10, 0, 2)).unwrap().is_complete());

        // no fix: empty fields are null, never zero
        let fix = table
            .get(&epoch(10, 0, 3))
            .and_then(|row| row.position_fix.as_ref())
            .unwrap();
        assert_eq!(fix.quality, Some(FixQuality::Invalid));
        assert_eq!(fix.latitude, None);
        assert_eq!(fix.latitude_ddeg, None);
        assert_eq!(fix.longitude_ddeg, None);
        assert_eq!(fix.altitude, None);
    }

    #[test]
    fn corrupted_log_checksum_validation() {
        let cfg = config().with_checksum_validation(true);
        let log = parse_resource("corrupted.log", &cfg);
        assert_eq!(log.diagnostics.count(IssueKind::ChecksumMismatch), 1);
        assert_eq!(log.diagnostics.total(), 7);

        let row = log.table.get(&epoch(10, 0, 2)).unwrap();
        assert!(row.error_stats.is_some());
        assert!(row.position_fix.is_none());
    }

    #[test]
    fn unknown_sentences_are_ignored() {
        let content = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A
$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75
$GPGST,123519.00,1.2,0.8,0.6,45.0,0.5,0.5,0.7*61";
        let log = NmeaLog::parse(content, &config()).unwrap();
        assert!(log.diagnostics.is_empty());
        assert_eq!(log.table.len(), 1);
    }

    #[test]
    fn stamping_with_offset() {
        let content = "$GPGST,123519.00,1.2,0.8,0.6,45.0,0.5,0.5,0.7*61
$GPGGA,123519.00,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*69";
        let cfg = config().with_utc_offset(UtcOffset::from_hours(2).unwrap());
        let log = NmeaLog::parse(content, &cfg).unwrap();
        let (t, row) = log.table.iter().next().unwrap();
        assert_eq!(*t, epoch(14, 35, 19));
        assert!(row.is_complete());
    }

    #[test]
    fn empty_input() {
        for content in ["", "\n\n", "  \r\n"] {
            match NmeaLog::parse(content, &config()) {
                Err(Error::EmptyInput) => {},
                other => panic!("expecting EmptyInput, got {:?}", other),
            }
        }
        let log = parse_resource("comments.log", &config());
        assert!(log.table.is_empty());
        assert!(log.diagnostics.is_empty());
    }

    #[test]
    fn default_config() {
        let log = NmeaLog::from_str("$GNGST,000001.00,0.9,,,,,,").unwrap();
        let (t, row) = log.table.iter().next().unwrap();
        assert_eq!(*t, Epoch::from_gregorian_utc(2000, 1, 1, 0, 0, 1, 0));
        let stats = row.error_stats.as_ref().unwrap();
        assert_eq!(stats.talker, Talker::Mixed);
        assert_eq!(stats.talker.constellation(), Some(Constellation::Mixed));
        assert_eq!(stats.rms, Some(0.9));
        assert_eq!(stats.sigma_alt, None);
    }

    #[test]
    fn invalid_utf8_line() {
        let log = parse_resource("garbled.log", &config());
        assert_eq!(log.diagnostics.count(IssueKind::MalformedLine), 1);
        assert_eq!(log.diagnostics.total(), 1);
        assert_eq!(log.diagnostics.errors().next().map(|d| d.line), Some(2));
        assert_eq!(
            log.table.epoch_iter().collect::<Vec<_>>(),
            vec![epoch(12, 35, 19), epoch(12, 35, 20)]
        );

        let content: &[u8] = b"$GPGST,123519.00,1.2,0.8,0.6,45.0,0.5,0.5,0.7*61\n\
$GPGGA,12\xff\xfe9.00,garbage\n\
$GPGST,123520.00,1.3,0.8,0.6,45.0,0.5,0.5,0.7\n";
        let log = NmeaLog::from_reader(Cursor::new(content), &config()).unwrap();
        assert_eq!(log.diagnostics.count(IssueKind::MalformedLine), 1);
        assert_eq!(log.table.count(Kind::ErrorStats), 2);

        // undecodable content only is not empty input
        let log = NmeaLog::from_reader(Cursor::new(&b"\xff\xfe\n"[..]), &config()).unwrap();
        assert!(log.table.is_empty());
        assert_eq!(log.diagnostics.count(IssueKind::MalformedLine), 1);
    }

    #[test]
    fn missing_file() {
        let cfg = config();
        match NmeaLog::from_file("test_resources/NMEA/does_not_exist.log", &cfg) {
            Err(Error::IoError(_)) => {},
            other => panic!("expecting IoError, got {:?}", other),
        }
    }
}

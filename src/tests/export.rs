#[cfg(test)]
mod test {
    use crate::tests::toolkit::{config, parse_resource, random_name};
    use std::fs;

    #[test]
    fn latlon_extract() {
        let log = parse_resource("interleaved.log", &config());

        let mut buf = Vec::<u8>::new();
        let written = log.table.write_latlon(&mut buf, 1).unwrap();
        assert_eq!(written, 5);

        let content = String::from_utf8(buf).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);

        for line in lines {
            let items = line.split(' ').collect::<Vec<_>>();
            assert_eq!(items.len(), 2, "bad line \"{}\"", line);
            let lat = items[0].parse::<f64>().unwrap();
            let lon = items[1].parse::<f64>().unwrap();
            assert!(lat > 48.0 && lat < 48.2);
            assert!(lon > 11.5 && lon < 11.6);
        }

        // rows: 19 (GGA), 21 (GST only), 23 (GGA)
        let mut buf = Vec::<u8>::new();
        assert_eq!(log.table.write_latlon(&mut buf, 2).unwrap(), 2);
    }

    #[test]
    fn latlon_file() {
        let log = parse_resource("interleaved.log", &config());
        let path = std::env::temp_dir().join(format!("{}.txt", random_name(8)));

        let written = log.table.write_latlon_file(&path, 10).unwrap();
        assert_eq!(written, 1);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.ends_with('\n'));

        let _ = fs::remove_file(&path);
    }
}

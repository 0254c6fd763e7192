use anyhow::Result;

use hpsdr_api as api;
use api::config::Config;
use api::decoder::Decoder;
use api::plugins::processor::Processor;

/// Every processor this binary ships with
pub fn processors() -> Vec<Box<dyn Processor>> {
    let mut processors = vec![command_reply::new_processor()];
    processors.extend(streams::processors());
    processors
}

pub fn new_decoder(cfg: Config) -> Result<Decoder> {
    Decoder::new(processors(), cfg)
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use rand::Rng;

    use super::*;
    use api::classifiers::{LearnedPorts, Substream};
    use api::fields::{ExpertKind, FieldId};
    use api::packet::{Datagram, Direction};
    use api::record::{Field, Record};

    fn decoder() -> Decoder {
        new_decoder(Config::default()).unwrap()
    }

    fn general(seq: u32, ports: &LearnedPorts) -> Datagram {
        let mut buf = vec![0u8; 60];
        buf[..4].copy_from_slice(&seq.to_be_bytes());
        let words = [
            (5, ports.ddcc),
            (7, ports.ducc),
            (9, ports.hpc),
            (11, ports.hps),
            (13, ports.ddca),
            (15, ports.duciq_base),
            (17, ports.ddciq_base),
            (19, ports.micl),
            (21, ports.wbd_base),
            (29, ports.mem_host),
            (31, ports.mem_hw),
        ];
        for (offset, port) in words.iter() {
            buf[*offset..*offset + 2].copy_from_slice(&port.to_be_bytes());
        }
        Datagram::new(5000, 1024, buf)
    }

    fn program(seq: u32, blocks: u32) -> Datagram {
        let mut buf = vec![0u8; 265];
        buf[..4].copy_from_slice(&seq.to_be_bytes());
        buf[4] = 0x05;
        buf[5..9].copy_from_slice(&blocks.to_be_bytes());
        Datagram::new(5000, 1024, buf)
    }

    fn substream(decoder: &Decoder, src: u16, dst: u16) -> Option<Substream> {
        decoder
            .decode(&Datagram::new(src, dst, vec![0, 0, 0, 1]))
            .map(|rec| rec.substream)
    }

    fn within(fields: &[Field], caplen: usize) -> bool {
        fields
            .iter()
            .all(|f| f.end() <= caplen && within(&f.children, caplen))
    }

    #[test]
    fn legacy_protocol_is_not_ours() {
        let decoder = decoder();
        let pkt = Datagram::new(5555, 1024, vec![0xef, 0xfe, 0x02, 0x00, 0x00]);
        assert!(decoder.decode(&pkt).is_none());
    }

    #[test]
    fn default_ddciq_port() {
        let decoder = decoder();
        // DDC IQ is sent by the hardware, so the source port decides
        assert_eq!(substream(&decoder, 1035, 7000), Some(Substream::DDCIQ));
        assert_eq!(substream(&decoder, 7000, 1035), Some(Substream::DUCIQ));
    }

    #[test]
    fn learned_ddciq_window() {
        let decoder = decoder();
        let ports = LearnedPorts {
            ddciq_base: 2000,
            ..Default::default()
        };
        assert!(decoder.decode(&general(1, &ports)).is_some());
        assert_eq!(substream(&decoder, 2079, 9000), Some(Substream::DDCIQ));
        assert_eq!(substream(&decoder, 2080, 9000), None);
    }

    #[test]
    fn program_full_block() {
        let decoder = decoder();
        let rec = decoder.decode(&program(1, 256)).unwrap();
        assert!(!rec.truncated);
        assert!(rec.diagnostic(ExpertKind::ProgramRollOver).is_none());
        assert_eq!(rec.field(FieldId::ProgramData).unwrap().length, 256);
        assert!(rec.diagnostics.is_empty());
    }

    #[test]
    fn program_roll_over() {
        let decoder = decoder();
        let rec = decoder.decode(&program(2, 100)).unwrap();
        assert_eq!(rec.field(FieldId::ProgramData).unwrap().length, 256);
        let diag = rec.diagnostic(ExpertKind::ProgramRollOver).unwrap();
        assert!(diag.message.contains("156"));

        let mut cfg = Config::default();
        cfg.strict_program_data_size = false;
        decoder.set_config(cfg);
        let rec = decoder.decode(&program(2, 100)).unwrap();
        assert!(rec.diagnostics.is_empty());
    }

    #[test]
    fn discovery_length() {
        let decoder = decoder();
        let mut buf = vec![0u8; 60];
        buf[4] = 0x02;
        let rec = decoder.decode(&Datagram::new(5000, 1024, buf.clone())).unwrap();
        assert!(rec.diagnostics.is_empty());

        buf.push(0);
        let rec = decoder.decode(&Datagram::new(5000, 1024, buf.clone())).unwrap();
        assert_eq!(rec.diagnostics.len(), 1);
        let diag = rec.diagnostic(ExpertKind::ExtraLength).unwrap();
        assert_eq!((diag.offset, diag.length), (60, 1));

        let mut cfg = Config::default();
        cfg.strict_size = false;
        decoder.set_config(cfg);
        let rec = decoder.decode(&Datagram::new(5000, 1024, buf)).unwrap();
        assert!(rec.diagnostics.is_empty());
    }

    #[test]
    fn decode_twice() {
        let decoder = decoder();
        let ports = LearnedPorts {
            ddcc: 3000,
            mem_host: 1040,
            ..Default::default()
        };
        let pkt = general(7, &ports);
        let first = decoder.decode(&pkt);
        let table = decoder.ports().snapshot();
        let second = decoder.decode(&pkt);
        assert_eq!(first, second);
        assert_eq!(table, decoder.ports().snapshot());
        assert_eq!(*table, ports);
    }

    #[test]
    fn zero_general_is_default() {
        let decoder = decoder();
        let candidates = [0u16, 1023, 1024, 1025, 1026, 1027, 1028, 1029, 1034, 1035, 1036, 1037, 1114, 1115, 5000];
        let classify_all = |decoder: &Decoder| -> Vec<Option<Substream>> {
            let mut out = vec![];
            for src in candidates.iter() {
                for dst in candidates.iter() {
                    out.push(substream(decoder, *src, *dst));
                }
            }
            out
        };

        let before = classify_all(&decoder);
        assert!(decoder.decode(&general(1, &LearnedPorts::default())).is_some());
        assert_eq!(*decoder.ports().snapshot(), LearnedPorts::default());
        assert_eq!(classify_all(&decoder), before);
    }

    #[test]
    fn truncated_general_teaches_nothing() {
        let decoder = decoder();
        let ports = LearnedPorts {
            ddcc: 3000,
            ..Default::default()
        };
        let mut pkt = general(1, &ports);
        pkt.payload.truncate(40);

        let rec = decoder.decode(&pkt).unwrap();
        assert!(rec.truncated);
        assert_eq!(rec.field(FieldId::DdccPort).unwrap().value.as_u32(), Some(3000));
        assert_eq!(*decoder.ports().snapshot(), LearnedPorts::default());
        assert_eq!(substream(&decoder, 5000, 3000), None);
    }

    #[test]
    fn hardware_sent_general_teaches_nothing() {
        let decoder = decoder();
        let ports = LearnedPorts {
            ddcc: 3000,
            ..Default::default()
        };
        let mut pkt = general(1, &ports);
        pkt.src_port = 1024;
        pkt.dst_port = 5000;
        decoder.decode(&pkt).unwrap();
        assert_eq!(*decoder.ports().snapshot(), LearnedPorts::default());
    }

    #[test]
    fn stream_records() {
        let decoder = decoder();
        let rec = decoder
            .decode(&Datagram::new(5000, 1028, vec![0, 0, 1, 0, 0xaa]))
            .unwrap();
        assert_eq!(rec.substream, Substream::DDCA);
        assert_eq!(rec.field(FieldId::Seq).unwrap().value.as_u32(), Some(256));
    }

    #[test]
    fn stream_directions() {
        let decoder = decoder();
        let cases = [
            (5000, 1025, Substream::DDCC, Direction::HostToHardware),
            (1025, 5000, Substream::HPS, Direction::HardwareToHost),
            (5000, 1027, Substream::HPC, Direction::HostToHardware),
            (5000, 1030, Substream::DUCIQ, Direction::HostToHardware),
            (1040, 5000, Substream::DDCIQ, Direction::HardwareToHost),
        ];
        for (src, dst, substream, direction) in cases.iter() {
            let rec = decoder
                .decode(&Datagram::new(*src, *dst, vec![0, 0, 0, 1]))
                .unwrap();
            assert_eq!(rec.substream, *substream);
            assert_eq!(rec.direction, *direction);
        }

        let rec = decoder.decode(&Datagram::new(5000, 1025, vec![0, 0, 0, 1])).unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"direction\":\"host-to-hardware\""));
    }

    #[test]
    fn random_datagrams() {
        let decoder = decoder();
        let mut rng = rand::thread_rng();
        let ports = [1024u16, 1025, 1026, 1027, 1028, 1029, 1035, 1037, 1100, 1115, 2000, 5000];

        for _ in 0..5000 {
            let len = rng.gen_range(0..300);
            let mut payload = vec![0u8; len];
            rng.fill(&mut payload[..]);
            if len > 4 && rng.gen_bool(0.5) {
                payload[4] = rng.gen_range(0..7);
            }
            let src = ports[rng.gen_range(0..ports.len())];
            let dst = ports[rng.gen_range(0..ports.len())];

            if let Some(rec) = decoder.decode(&Datagram::new(src, dst, payload)) {
                assert!(within(&rec.fields, len));
                assert!(rec.consumed <= len);
                assert!(rec
                    .diagnostics
                    .iter()
                    .all(|d| d.offset + d.length <= len));
                if let Some(data) = rec.field(FieldId::ProgramData) {
                    assert!(data.length <= 256);
                }
            }
        }
    }

    #[test]
    fn concurrent_commits() {
        let decoder = Arc::new(decoder());
        let a = LearnedPorts {
            ddcc: 3000,
            hps: 3001,
            ducc: 3002,
            micl: 3003,
            hpc: 3004,
            wbd_base: 3010,
            ddca: 3005,
            duciq_base: 3020,
            ddciq_base: 3100,
            mem_host: 3200,
            mem_hw: 3300,
        };
        let b = LearnedPorts {
            ddcc: 4000,
            hps: 4001,
            ducc: 4002,
            micl: 4003,
            hpc: 4004,
            wbd_base: 4010,
            ddca: 4005,
            duciq_base: 4020,
            ddciq_base: 4100,
            mem_host: 4200,
            mem_hw: 4300,
        };

        let writer = {
            let decoder = decoder.clone();
            std::thread::spawn(move || {
                for seq in 0..2000u32 {
                    let ports = if seq % 2 == 0 { &a } else { &b };
                    decoder.decode(&general(seq, ports));
                }
            })
        };

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let decoder = decoder.clone();
                std::thread::spawn(move || {
                    for _ in 0..2000 {
                        let seen = *decoder.ports().snapshot();
                        assert!(seen == a || seen == b || seen == LearnedPorts::default());
                        let _: Option<Record> =
                            decoder.decode(&Datagram::new(3100, 9000, vec![0, 0, 0, 1]));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(*decoder.ports().snapshot(), b);
    }
}

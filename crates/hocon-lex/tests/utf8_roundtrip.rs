//! Property: any valid `char` survives encode -> decode through the codec.

use hocon_lex::codec;
use proptest::prelude::*;

proptest! {
    #[test]
    fn encode_then_decode_is_identity(ch in any::<char>()) {
        let mut buf = Vec::new();
        codec::encode(ch, &mut buf);
        prop_assert_eq!(buf.len(), codec::encoded_length(ch));

        let (length, acc) = codec::decode_lead(buf[0]).expect("lead byte of our own encoding");
        prop_assert_eq!(length, buf.len());
        let decoded = codec::decode_tail(&buf[1..], length, acc).expect("tail of our own encoding");
        prop_assert_eq!(decoded, ch);
    }
}

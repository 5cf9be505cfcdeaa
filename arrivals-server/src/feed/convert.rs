//! Conversion from GTFS-realtime protobuf messages to feed snapshots.

use chrono::{DateTime, Utc};
use gtfs_realtime::FeedMessage;
use prost::Message;

use super::error::FeedError;
use super::types::{FeedSnapshot, StopTimeUpdate, Trip};

/// Decode a protobuf body into a snapshot for `endpoint_id`.
pub fn decode_feed(
    endpoint_id: &str,
    body: impl prost::bytes::Buf,
) -> Result<FeedSnapshot, FeedError> {
    let message = FeedMessage::decode(body).map_err(|e| FeedError::Decode(e.to_string()))?;
    Ok(convert_feed_message(endpoint_id, &message))
}

/// Extract trips from a decoded feed message.
///
/// Only `trip_update` entities matter here; vehicle positions and alerts
/// are ignored. Trips without a route id cannot be shown to riders and are
/// skipped. Protobuf trip updates carry no headsign, so `headsign` is
/// always `None`.
pub fn convert_feed_message(endpoint_id: &str, message: &FeedMessage) -> FeedSnapshot {
    let trips = message
        .entity
        .iter()
        .filter(|entity| !entity.is_deleted.unwrap_or(false))
        .filter_map(|entity| entity.trip_update.as_ref())
        .filter_map(|update| {
            let route_id = update.trip.route_id.as_deref()?;
            let stop_time_updates = update
                .stop_time_update
                .iter()
                .filter_map(|stu| {
                    let stop_id = stu.stop_id.clone()?;
                    let arrival = stu
                        .arrival
                        .as_ref()
                        .and_then(|event| event.time)
                        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
                    Some(StopTimeUpdate { stop_id, arrival })
                })
                .collect();

            Some(Trip {
                route_id: route_id.to_string(),
                headsign: None,
                stop_time_updates,
            })
        })
        .collect();

    FeedSnapshot::new(endpoint_id, trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtfs_realtime::trip_update::{StopTimeEvent, StopTimeUpdate as RtStopTimeUpdate};
    use gtfs_realtime::{FeedEntity, FeedHeader, TripDescriptor, TripUpdate};

    fn stop(stop_id: &str, arrival: Option<i64>) -> RtStopTimeUpdate {
        RtStopTimeUpdate {
            stop_id: Some(stop_id.to_string()),
            arrival: arrival.map(|time| StopTimeEvent {
                time: Some(time),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn entity(id: &str, route_id: Option<&str>, stops: Vec<RtStopTimeUpdate>) -> FeedEntity {
        FeedEntity {
            id: id.to_string(),
            trip_update: Some(TripUpdate {
                trip: TripDescriptor {
                    route_id: route_id.map(str::to_string),
                    ..Default::default()
                },
                stop_time_update: stops,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn message(entities: Vec<FeedEntity>) -> FeedMessage {
        FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "1.0".to_string(),
                ..Default::default()
            },
            entity: entities,
        }
    }

    #[test]
    fn converts_trip_updates() {
        let msg = message(vec![entity(
            "1",
            Some("6X"),
            vec![stop("635N", Some(1_700_000_000)), stop("636N", None)],
        )]);

        let snapshot = convert_feed_message("1,2,3,4,5,6,S", &msg);

        assert_eq!(snapshot.endpoint_id, "1,2,3,4,5,6,S");
        assert_eq!(snapshot.trips.len(), 1);
        let trip = &snapshot.trips[0];
        assert_eq!(trip.route_id, "6X");
        assert_eq!(trip.headsign, None);
        assert_eq!(trip.stop_time_updates.len(), 2);
        assert_eq!(
            trip.stop_time_updates[0].arrival,
            DateTime::<Utc>::from_timestamp(1_700_000_000, 0)
        );
        assert_eq!(trip.stop_time_updates[1].arrival, None);
    }

    #[test]
    fn skips_deleted_routeless_and_non_trip_entities() {
        let mut deleted = entity("1", Some("A"), vec![stop("A27N", Some(1))]);
        deleted.is_deleted = Some(true);
        let routeless = entity("2", None, vec![stop("A27N", Some(1))]);
        let vehicle_only = FeedEntity {
            id: "3".to_string(),
            ..Default::default()
        };
        let kept = entity("4", Some("C"), vec![stop("A27S", Some(1))]);

        let snapshot =
            convert_feed_message("A,C,E", &message(vec![deleted, routeless, vehicle_only, kept]));

        assert_eq!(snapshot.trips.len(), 1);
        assert_eq!(snapshot.trips[0].route_id, "C");
    }

    #[test]
    fn decodes_protobuf_body() {
        let msg = message(vec![entity("1", Some("L"), vec![stop("L06N", Some(42))])]);
        let bytes = msg.encode_to_vec();

        let snapshot = decode_feed("L", bytes.as_slice()).unwrap();

        assert_eq!(snapshot.trips.len(), 1);
        assert_eq!(snapshot.trips[0].stop_time_updates[0].stop_id, "L06N");
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let result = decode_feed("G", &[0xff, 0xff, 0xff][..]);
        assert!(matches!(result, Err(FeedError::Decode(_))));
    }
}

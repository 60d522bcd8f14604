//! Bloodlink demo binary.
//!
//! Seeds the sample city network, registers a handful of donors, submits
//! one urgent request and runs it through the full match cycle. The JSON
//! printed at the end is the shape a real API layer would return.

use std::rc::Rc;

use tracing::info;

use bloodlink::graph::RouteGraph;
use bloodlink::registry::Registry;
use bloodlink::types::{BloodGroup, Donor, DonorStatus, Recipient, RequestStatus, Urgency};
use bloodlink::MatchingEngine;

/// Hospitals, donor areas and road distances for the demo city.
fn seed_city_graph() -> RouteGraph {
    let mut graph = RouteGraph::new();

    graph.add_node("H1", "PIMS", "hospital", 100, 150);
    graph.add_node("H2", "Shifa International", "hospital", 180, 140);
    graph.add_node("H3", "Aga Khan Hospital", "hospital", 300, 400);
    graph.add_node("D1", "F-8 Sector", "donor_area", 120, 130);
    graph.add_node("D2", "G-9 Sector", "donor_area", 110, 160);
    graph.add_node("D3", "DHA Phase 5", "donor_area", 290, 390);

    graph.add_edge("H1", "D1", 5.2);
    graph.add_edge("H1", "D2", 3.8);
    graph.add_edge("H2", "D1", 7.5);
    graph.add_edge("H2", "D2", 9.2);
    graph.add_edge("H3", "D3", 4.5);
    graph.add_edge("D1", "D2", 2.1);

    graph
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let graph = seed_city_graph();
    let mut registry = Registry::new();
    let mut engine = MatchingEngine::new();

    info!(nodes = graph.node_count(), "city network seeded");

    // Register the demo donor pool.
    let donors = [
        Donor::new("Ayesha Khan", 29, BloodGroup::ONeg, "Islamabad", "F-8", "D1"),
        Donor::new("Bilal Ahmed", 35, BloodGroup::APos, "Islamabad", "G-9", "D2"),
        Donor::new("Sana Malik", 41, BloodGroup::BPos, "Karachi", "DHA", "D3"),
    ];
    for donor in donors {
        let handle = registry.register_donor(donor);
        engine.add_donor(handle);
    }

    // An AB+ patient at PIMS needs blood now.
    let request = registry.register_recipient(Recipient::new(
        "Hamza Tariq",
        BloodGroup::AbPos,
        Urgency::Immediate,
        "PIMS",
        "H1",
    ));
    engine.add_recipient_request(Rc::clone(&request));
    request.borrow_mut().status = RequestStatus::Searching;

    let Some(pending) = engine.pop_urgent_request() else {
        println!("no pending requests");
        return;
    };

    let matched = {
        let recipient = pending.borrow();
        engine.find_best_donor_for(&graph, &recipient)
    };

    let response = match matched {
        Some(donor) => {
            let route = {
                let donor_ref = donor.borrow();
                let recipient_ref = pending.borrow();
                graph.dijkstra(&donor_ref.location_node_id, &recipient_ref.location_node_id)
            };

            donor.borrow_mut().status = DonorStatus::Busy;
            {
                let mut recipient = pending.borrow_mut();
                recipient.status = RequestStatus::Matched;
                recipient.matched_donor_id = Some(donor.borrow().id.clone());
            }
            let transaction = registry.record_match(&donor, &pending, route.distance);
            let distance_km = route.distance;

            serde_json::json!({
                "matched": true,
                "requestId": pending.borrow().id,
                "donorId": donor.borrow().id,
                "donorName": donor.borrow().name,
                "distanceKm": distance_km,
                "route": route,
                "estimatedTravelMinutes": (distance_km * 3.0).round() as i64,
                "estimatedMatchMinutes": engine.estimate_match_time(&pending.borrow()),
                "transactionId": transaction.id,
            })
        }
        None => serde_json::json!({
            "matched": false,
            "requestId": pending.borrow().id,
            "message": "no compatible donor reachable right now",
        }),
    };

    match serde_json::to_string_pretty(&response) {
        Ok(body) => println!("{body}"),
        Err(e) => eprintln!("failed to encode response: {e}"),
    }
}

//! In-memory station catalog.

use std::collections::HashMap;

use tracing::debug;

use crate::model::ChargingStationRef;
use crate::traits::StationRepository;

/// Keeps stations in first-insert order; saving an existing id replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStationRepository {
    stations: Vec<ChargingStationRef>,
    index: HashMap<String, usize>,
}

impl InMemoryStationRepository {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<ChargingStationRef> for InMemoryStationRepository {
    fn from_iter<T: IntoIterator<Item = ChargingStationRef>>(iter: T) -> Self {
        let mut repository = Self::new();
        for station in iter {
            repository.save(station);
        }
        repository
    }
}

impl StationRepository for InMemoryStationRepository {
    fn load(&self, id: &str) -> Option<ChargingStationRef> {
        self.index.get(id).map(|&i| self.stations[i].clone())
    }

    fn save(&mut self, station: ChargingStationRef) {
        match self.index.get(&station.id) {
            Some(&i) => {
                debug!(station_id = %station.id, "replacing station");
                self.stations[i] = station;
            }
            None => {
                debug!(station_id = %station.id, "adding station");
                self.index.insert(station.id.clone(), self.stations.len());
                self.stations.push(station);
            }
        }
    }

    fn snapshot(&self) -> Vec<ChargingStationRef> {
        self.stations.clone()
    }
}
